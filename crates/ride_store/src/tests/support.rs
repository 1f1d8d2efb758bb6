
use std::collections::HashMap;

use async_trait::async_trait;
use shared::domain::{Ride, RideData, RideId};
use tokio::sync::{oneshot, Mutex};

use crate::{error::ServiceError, service::RidesService};

pub(crate) type Gate = oneshot::Sender<Result<Ride, ServiceError>>;

/// Answers reads from a fixed list, fails deletes on request and holds
/// creates until the test releases them by `"name"`.
#[derive(Default)]
pub(crate) struct ScriptedService {
    pub rides: Vec<Ride>,
    pub delete_failure: Option<(u16, Option<String>)>,
    create_gates: Mutex<HashMap<String, oneshot::Receiver<Result<Ride, ServiceError>>>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub(crate) fn with_rides(rides: Vec<Ride>) -> Self {
        Self {
            rides,
            ..Self::default()
        }
    }

    pub(crate) fn failing_deletes(status: u16, message: Option<&str>) -> Self {
        Self {
            delete_failure: Some((status, message.map(str::to_string))),
            ..Self::default()
        }
    }

    pub(crate) async fn gate_create(&self, name: &str) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.create_gates.lock().await.insert(name.to_string(), rx);
        tx
    }

    async fn record(&self, call: String) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl RidesService for ScriptedService {
    async fn get_all(&self) -> Result<Vec<Ride>, ServiceError> {
        self.record("get_all".into()).await;
        Ok(self.rides.clone())
    }

    async fn get_one(&self, id: RideId) -> Result<Ride, ServiceError> {
        self.record(format!("get_one {id}")).await;
        self.rides
            .iter()
            .find(|ride| ride.id == id)
            .cloned()
            .ok_or(ServiceError::Server {
                status: 404,
                message: Some("not found".into()),
            })
    }

    async fn create(&self, data: &RideData) -> Result<Ride, ServiceError> {
        let name = data
            .get("name")
            .and_then(|name| name.as_str())
            .unwrap_or_default()
            .to_string();
        self.record(format!("create {name}")).await;

        let gate = self.create_gates.lock().await.remove(&name);
        match gate {
            Some(gate) => gate.await.unwrap_or(Err(ServiceError::Server {
                status: 500,
                message: None,
            })),
            None => Ok(Ride::new(RideId(100)).with_field("name", name)),
        }
    }

    async fn update(&self, data: &RideData, id: RideId) -> Result<Ride, ServiceError> {
        self.record(format!("update {id}")).await;
        let mut ride = Ride::new(id);
        if let Some(fields) = data.as_object() {
            ride.fields = fields.clone();
        }
        Ok(ride)
    }

    async fn delete(&self, id: RideId) -> Result<(), ServiceError> {
        self.record(format!("delete {id}")).await;
        match &self.delete_failure {
            Some((status, message)) => Err(ServiceError::Server {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}
