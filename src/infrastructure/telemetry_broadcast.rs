// Telemetry broadcast - Fans simulator output out to stream subscribers
use crate::application::flight_simulator::TelemetryObserver;
use crate::domain::telemetry::{FlightEvent, TelemetryMessage, TelemetrySample};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

pub struct BroadcastObserver {
    tx: broadcast::Sender<TelemetryMessage>,
}

impl BroadcastObserver {
    pub fn channel() -> (Self, broadcast::Sender<TelemetryMessage>) {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        (Self { tx: tx.clone() }, tx)
    }
}

impl TelemetryObserver for BroadcastObserver {
    fn on_sample(&mut self, sample: &TelemetrySample) {
        // No subscribers is the common case between stream requests
        let _ = self.tx.send(TelemetryMessage::Sample(*sample));
    }

    fn on_event(&mut self, event: &FlightEvent) {
        let _ = self.tx.send(TelemetryMessage::Flight(*event));
    }
}
