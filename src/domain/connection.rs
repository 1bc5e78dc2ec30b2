// Device connection state machine
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Work a toggle request kicks off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionAction {
    Connect,
    Disconnect,
}

impl ConnectionState {
    /// Toggle is only honoured from the two settled states.
    pub fn toggle(self) -> Option<ConnectionAction> {
        match self {
            ConnectionState::Disconnected => Some(ConnectionAction::Connect),
            ConnectionState::Connected => Some(ConnectionAction::Disconnect),
            ConnectionState::Connecting | ConnectionState::Error => None,
        }
    }

    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }

    pub fn indicator(self) -> StatusIndicator {
        match self {
            ConnectionState::Disconnected => StatusIndicator {
                class: "offline",
                button_key: "connection.connect",
                status_key: "home.disconnected",
            },
            ConnectionState::Connecting => StatusIndicator {
                class: "connecting",
                button_key: "connection.connecting",
                status_key: "home.connecting",
            },
            ConnectionState::Connected => StatusIndicator {
                class: "online",
                button_key: "connection.disconnect",
                status_key: "home.ready",
            },
            ConnectionState::Error => StatusIndicator {
                class: "error",
                button_key: "connection.error",
                status_key: "home.connectionError",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIndicator {
    pub class: &'static str,
    pub button_key: &'static str,
    pub status_key: &'static str,
}

/// Localized view of the connection for the header bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionStatus {
    pub state: ConnectionState,
    pub indicator: &'static str,
    pub button: String,
    pub status: String,
}
