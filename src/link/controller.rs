use anyhow::{bail, Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::console::ConsoleController;
use crate::settings::RigSettings;

use super::worker::link_loop;

/// Owns the background task that feeds rig push events into the console.
pub struct RigLink {
    client: reqwest::Client,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl RigLink {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start(&mut self, settings: &RigSettings, console: ConsoleController) -> Result<()> {
        if self.handle.is_some() {
            bail!("rig link already active");
        }

        let events_url = settings.endpoint("events");
        info!("Subscribing to rig events at {events_url}");

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(link_loop(
            events_url,
            self.client.clone(),
            console,
            Duration::from_millis(settings.reconnect_delay_ms),
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("rig link task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }

    pub async fn restart(&mut self, settings: &RigSettings, console: ConsoleController) -> Result<()> {
        self.stop().await?;
        self.start(settings, console)
    }
}
