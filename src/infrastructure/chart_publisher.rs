// Chart publisher - Renders chart windows into a watch channel for HTTP readers
use crate::application::chart_buffer::ChartRenderer;
use crate::domain::chart::{Channel, ChartSnapshot};
use std::collections::BTreeMap;
use tokio::sync::watch;

pub struct WatchChartRenderer {
    tx: watch::Sender<ChartSnapshot>,
}

impl WatchChartRenderer {
    pub fn channel() -> (Self, watch::Receiver<ChartSnapshot>) {
        let (tx, rx) = watch::channel(ChartSnapshot::default());
        (Self { tx }, rx)
    }
}

impl ChartRenderer for WatchChartRenderer {
    fn render(&mut self, labels: &[String], series: &BTreeMap<Channel, Vec<f64>>) {
        // send_replace keeps publishing even when no reader is subscribed yet
        self.tx.send_replace(ChartSnapshot {
            labels: labels.to_vec(),
            series: series.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_publishes_latest_window() {
        let (mut renderer, rx) = WatchChartRenderer::channel();
        let mut series = BTreeMap::new();
        series.insert(Channel::Altitude, vec![1.0, 2.0]);

        renderer.render(&["a".to_string(), "b".to_string()], &series);
        series.insert(Channel::Altitude, vec![2.0, 3.0]);
        renderer.render(&["b".to_string(), "c".to_string()], &series);

        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.labels, vec!["b", "c"]);
        assert_eq!(snapshot.channel(Channel::Altitude), Some(&[2.0, 3.0][..]));
    }
}
