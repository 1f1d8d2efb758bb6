use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ride_store::{
    Action, Alert, AlertLevel, AppState, ChannelNotifier, HttpRidesService, RideSelectors,
    RideStore,
};
use serde_json::{json, Value};
use shared::domain::{RideData, RideId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "rides", about = "Load and edit rides through the ride store")]
struct Args {
    /// Config file; defaults to ./rides.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every ride.
    List,
    /// Fetch one ride.
    Get { id: i64 },
    Create {
        /// Ride fields as a JSON object.
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete { id: i64 },
}

impl Command {
    fn into_action(self) -> Result<Action> {
        Ok(match self {
            Command::List => Action::LoadAll,
            Command::Get { id } => Action::LoadOne { id: RideId(id) },
            Command::Create { data } => Action::Create {
                data: parse_data(&data)?,
            },
            Command::Update { id, data } => Action::Update {
                data: parse_data(&data)?,
                id: RideId(id),
            },
            Command::Delete { id } => Action::Delete { id: RideId(id) },
        })
    }
}

fn parse_data(raw: &str) -> Result<RideData> {
    let data: Value = serde_json::from_str(raw).context("--data must be valid JSON")?;
    if !data.is_object() {
        bail!("--data must be a JSON object");
    }
    Ok(data)
}

fn alert_line(alert: &Alert) -> String {
    match alert.level {
        AlertLevel::Success => alert.message.clone(),
        AlertLevel::Error => format!("error: {}", alert.message),
    }
}

/// JSON printed for a settled command. Failures become an error so the process exits non-zero.
fn render_outcome(outcome: &Action, state: &AppState) -> Result<Value> {
    if let Some(error) = outcome.failure_message() {
        bail!("{}: {error}", outcome.label());
    }

    let mut selectors = RideSelectors::new();
    Ok(match outcome {
        Action::LoadAllOk { .. } => serde_json::to_value(&*selectors.all_rides(state))?,
        Action::LoadOneOk { .. } => serde_json::to_value(selectors.single_ride(state))?,
        Action::CreateOk { ride, .. } | Action::UpdateOk { ride, .. } => {
            serde_json::to_value(ride)?
        }
        Action::DeleteOk { id, .. } => json!({ "deleted": id }),
        other => serde_json::to_value(other)?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = Some(timeout_secs);
    }
    settings.validate()?;

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let service = HttpRidesService::new(&settings.api_url, settings.request_timeout())
        .context("failed to build rides client")?;
    let (notifier, mut alerts) = ChannelNotifier::new();
    let store = RideStore::spawn(Arc::new(service), Arc::new(notifier));

    let action = args.command.into_action()?;
    debug!(action = action.label(), api_url = %settings.api_url, "dispatching");
    let outcome = store.dispatch_and_wait(action).await?;

    let state = store.state();
    store.shutdown().await;

    while let Ok(alert) = alerts.try_recv() {
        eprintln!("{}", alert_line(&alert));
    }

    let output = render_outcome(&outcome, &state)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
