// Connection service - Simulated device link with delayed transitions
use crate::domain::connection::{ConnectionAction, ConnectionState};
use crate::infrastructure::config::ConnectionTiming;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct ConnectionService {
    state: Arc<RwLock<ConnectionState>>,
    disconnect_pending: Arc<AtomicBool>,
    timing: ConnectionTiming,
}

impl ConnectionService {
    pub fn new(timing: ConnectionTiming) -> Self {
        Self {
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            disconnect_pending: Arc::new(AtomicBool::new(false)),
            timing,
        }
    }

    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Start connecting or disconnecting; returns the state right after the request.
    pub async fn toggle(&self) -> ConnectionState {
        let mut state = self.state.write().await;
        match state.toggle() {
            Some(ConnectionAction::Connect) => {
                tracing::info!("Connecting to device...");
                *state = ConnectionState::Connecting;
                tokio::spawn(self.clone().finish_connect());
            }
            Some(ConnectionAction::Disconnect) => {
                // The link stays Connected until the disconnect lands
                if self.disconnect_pending.swap(true, Ordering::SeqCst) {
                    tracing::debug!("Disconnect already pending");
                } else {
                    tracing::info!("Disconnecting from device...");
                    tokio::spawn(self.clone().finish_disconnect());
                }
            }
            None => {
                tracing::debug!(state = ?*state, "Ignoring toggle while transition is pending");
            }
        }
        *state
    }

    async fn finish_connect(self) {
        tokio::time::sleep(Duration::from_millis(self.timing.connect_delay_ms)).await;

        let connected = rand::random_bool(self.timing.success_rate);
        {
            let mut state = self.state.write().await;
            if *state != ConnectionState::Connecting {
                return;
            }
            if connected {
                *state = ConnectionState::Connected;
                tracing::info!("Device connected");
            } else {
                *state = ConnectionState::Error;
                tracing::error!("Device connection failed");
            }
        }

        if !connected {
            tokio::time::sleep(Duration::from_millis(self.timing.error_reset_ms)).await;
            let mut state = self.state.write().await;
            if *state == ConnectionState::Error {
                *state = ConnectionState::Disconnected;
                tracing::debug!("Connection error cleared");
            }
        }
    }

    async fn finish_disconnect(self) {
        tokio::time::sleep(Duration::from_millis(self.timing.disconnect_delay_ms)).await;
        let mut state = self.state.write().await;
        if state.is_connected() {
            *state = ConnectionState::Disconnected;
            tracing::info!("Device disconnected");
        }
        self.disconnect_pending.store(false, Ordering::SeqCst);
    }
}
