use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Ride, RideData, RideId},
    error::ApiErrorBody,
    protocol::DataEnvelope,
};
use tracing::debug;
use url::Url;

use crate::error::ServiceError;

#[async_trait]
pub trait RidesService: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Ride>, ServiceError>;
    async fn get_one(&self, id: RideId) -> Result<Ride, ServiceError>;
    async fn create(&self, data: &RideData) -> Result<Ride, ServiceError>;
    async fn update(&self, data: &RideData, id: RideId) -> Result<Ride, ServiceError>;
    async fn delete(&self, id: RideId) -> Result<(), ServiceError>;
}

/// REST client for a rides resource such as `https://host/api/rides`.
pub struct HttpRidesService {
    http: Client,
    base_url: String,
}

impl HttpRidesService {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ServiceError> {
        let parsed =
            Url::parse(base_url).map_err(|err| ServiceError::InvalidUrl(format!("{base_url}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ServiceError::InvalidUrl(format!(
                "{base_url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn item_url(&self, id: RideId) -> String {
        format!("{}/{}", self.base_url, id.0)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ServiceError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = ApiErrorBody::from_bytes(&body).message().map(str::to_string);
        debug!(status = status.as_u16(), ?message, "rides backend rejected request");
        Err(ServiceError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_for_data<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let body = self.send(request).await?.bytes().await?;
        let envelope: DataEnvelope<T> =
            serde_json::from_slice(&body).map_err(|err| ServiceError::Decode(err.to_string()))?;
        Ok(envelope.into_inner())
    }
}

#[async_trait]
impl RidesService for HttpRidesService {
    async fn get_all(&self) -> Result<Vec<Ride>, ServiceError> {
        self.send_for_data(self.http.get(&self.base_url)).await
    }

    async fn get_one(&self, id: RideId) -> Result<Ride, ServiceError> {
        self.send_for_data(self.http.get(self.item_url(id))).await
    }

    async fn create(&self, data: &RideData) -> Result<Ride, ServiceError> {
        self.send_for_data(self.http.post(&self.base_url).json(data))
            .await
    }

    async fn update(&self, data: &RideData, id: RideId) -> Result<Ride, ServiceError> {
        self.send_for_data(self.http.put(self.item_url(id)).json(data))
            .await
    }

    async fn delete(&self, id: RideId) -> Result<(), ServiceError> {
        self.send(self.http.delete(self.item_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
