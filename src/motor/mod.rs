mod types;

pub use types::{MotorCommand, MotorKey};

use log::{debug, warn};
use tokio::{sync::Mutex, task::JoinHandle};

/// Fire-and-forget relay of keyboard state to the rig's motors. A new
/// command aborts whatever post is still in flight.
pub struct MotorRelay {
    inner: Mutex<RelayState>,
    client: reqwest::Client,
}

struct RelayState {
    endpoint: String,
    command: MotorCommand,
    in_flight: Option<JoinHandle<()>>,
}

impl MotorRelay {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self {
            inner: Mutex::new(RelayState {
                endpoint,
                command: MotorCommand::default(),
                in_flight: None,
            }),
            client,
        }
    }

    pub async fn set_endpoint(&self, endpoint: String) {
        self.inner.lock().await.endpoint = endpoint;
    }

    pub async fn current(&self) -> MotorCommand {
        self.inner.lock().await.command
    }

    /// Applies a key transition and posts the updated command. Keys outside
    /// the motor map are ignored and post nothing.
    pub async fn relay_key(&self, key: &str, pressed: bool) -> Option<MotorCommand> {
        let motor_key = MotorKey::from_key(key)?;
        let mut state = self.inner.lock().await;
        state.command.apply(motor_key, pressed);
        self.dispatch(&mut state);
        Some(state.command)
    }

    pub async fn resend(&self) -> MotorCommand {
        let mut state = self.inner.lock().await;
        self.dispatch(&mut state);
        state.command
    }

    fn dispatch(&self, state: &mut RelayState) {
        if let Some(previous) = state.in_flight.take() {
            previous.abort();
        }

        let client = self.client.clone();
        let endpoint = state.endpoint.clone();
        let command = state.command;
        debug!("motor command {command:?}");

        state.in_flight = Some(tokio::spawn(async move {
            let result = client
                .post(&endpoint)
                .json(&command)
                .send()
                .await
                .and_then(|response| response.error_for_status());
            if let Err(err) = result {
                warn!("motor command to {endpoint} failed: {err}");
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 9 (discard) on localhost: posts fail fast and are only logged.
    fn relay() -> MotorRelay {
        MotorRelay::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/controllerdata".into(),
        )
    }

    #[tokio::test]
    async fn unmapped_keys_do_not_change_command() {
        let relay = relay();
        assert!(relay.relay_key("z", true).await.is_none());
        assert_eq!(relay.current().await, MotorCommand::default());
    }

    #[tokio::test]
    async fn key_transitions_update_current_command() {
        let relay = relay();
        let pressed = relay.relay_key("d", true).await;
        assert_eq!(pressed.map(|c| c.right), Some(1));

        let released = relay.relay_key("D", false).await;
        assert_eq!(released, Some(MotorCommand::default()));
        assert_eq!(relay.resend().await, MotorCommand::default());
    }
}
