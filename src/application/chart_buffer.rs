// Rolling chart buffer - Fixed-size windows per channel sharing one time axis
use crate::domain::chart::{Channel, ChartSnapshot, RollingSeries};
use crate::domain::error::StationError;
use chrono::{DateTime, Duration, TimeZone};
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt::Display;

pub const DEFAULT_CHART_WINDOW: usize = 30;
const LABEL_FORMAT: &str = "%H:%M:%S";

/// Draws charts from the current window. Never read back from.
pub trait ChartRenderer: Send {
    fn render(&mut self, labels: &[String], series: &BTreeMap<Channel, Vec<f64>>);
}

pub struct RollingChartBuffer {
    window: usize,
    labels: RollingSeries<String>,
    series: BTreeMap<Channel, RollingSeries<f64>>,
    renderers: Vec<Box<dyn ChartRenderer>>,
}

impl RollingChartBuffer {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            labels: RollingSeries::new(window),
            series: BTreeMap::new(),
            renderers: Vec::new(),
        }
    }

    /// Seed `channels` with a full window of placeholders ending at `now`.
    pub fn initialize<Tz, R>(&mut self, channels: &[Channel], now: DateTime<Tz>, rng: &mut R)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
        R: Rng + ?Sized,
    {
        self.labels.clear();
        self.series.clear();

        for i in 0..self.window {
            let offset = Duration::seconds((self.window - 1 - i) as i64);
            self.labels.push(format_label(&(now.clone() - offset)));
        }

        for channel in channels {
            let mut series = RollingSeries::new(self.window);
            for _ in 0..self.window {
                series.push(channel.placeholder(rng));
            }
            self.series.insert(*channel, series);
        }
    }

    pub fn attach(&mut self, renderer: Box<dyn ChartRenderer>) {
        self.renderers.push(renderer);
    }

    /// Append a single channel value at `at`; other channels repeat their last value.
    #[allow(dead_code)]
    pub fn append<Tz>(
        &mut self,
        channel: Channel,
        value: f64,
        at: DateTime<Tz>,
    ) -> Result<(), StationError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.append_frame(at, &[(channel, value)])
    }

    /// Append one column across every series, evict overflow, then render.
    ///
    /// Channels absent from `values` carry their previous value forward so
    /// every series stays the same length as the label axis. Unknown channels
    /// are rejected before anything is mutated.
    pub fn append_frame<Tz>(
        &mut self,
        at: DateTime<Tz>,
        values: &[(Channel, f64)],
    ) -> Result<(), StationError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if let Some((channel, _)) = values.iter().find(|(c, _)| !self.series.contains_key(c)) {
            return Err(StationError::UnknownChannel(channel.to_string()));
        }

        self.labels.push(format_label(&at));
        for (channel, series) in self.series.iter_mut() {
            let value = values
                .iter()
                .find(|(c, _)| c == channel)
                .map(|(_, v)| *v)
                .or_else(|| series.last().copied())
                .unwrap_or(0.0);
            series.push(value);
        }
        debug_assert!(self.series.values().all(|s| s.len() == self.labels.len()));

        self.render();
        Ok(())
    }

    /// Hand the current window to every attached renderer.
    pub fn render(&mut self) {
        if self.renderers.is_empty() || self.labels.is_empty() {
            return;
        }
        let ChartSnapshot { labels, series } = self.snapshot();
        for renderer in self.renderers.iter_mut() {
            renderer.render(&labels, &series);
        }
    }

    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            labels: self.labels.to_vec(),
            series: self
                .series
                .iter()
                .map(|(channel, series)| (*channel, series.to_vec()))
                .collect(),
        }
    }
}

fn format_label<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(LABEL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::{Arc, Mutex};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn seeded_buffer() -> RollingChartBuffer {
        let mut buffer = RollingChartBuffer::new(DEFAULT_CHART_WINDOW);
        let mut rng = StdRng::seed_from_u64(3);
        buffer.initialize(&Channel::ALL, start(), &mut rng);
        buffer
    }

    struct CountingRenderer(Arc<Mutex<Vec<(usize, Vec<usize>)>>>);

    impl ChartRenderer for CountingRenderer {
        fn render(&mut self, labels: &[String], series: &BTreeMap<Channel, Vec<f64>>) {
            let lengths = series.values().map(Vec::len).collect();
            self.0.lock().unwrap().push((labels.len(), lengths));
        }
    }

    #[test]
    fn test_initialize_seeds_full_window() {
        let buffer = seeded_buffer();
        let snapshot = buffer.snapshot();

        assert_eq!(snapshot.labels.len(), 30);
        assert_eq!(snapshot.labels.first().unwrap(), "11:59:31");
        assert_eq!(snapshot.labels.last().unwrap(), "12:00:00");
        assert!(snapshot.channel(Channel::Altitude).unwrap().iter().all(|v| *v == 0.0));
        assert!(snapshot.channel(Channel::AccelZ).unwrap().iter().all(|v| *v == 1.0));
        assert!(
            snapshot
                .channel(Channel::Temperature)
                .unwrap()
                .iter()
                .all(|v| (20.0..21.0).contains(v))
        );
    }

    #[test]
    fn test_append_evicts_head() {
        let mut buffer = seeded_buffer();
        for i in 0..30 {
            buffer
                .append_frame(start() + Duration::seconds(i + 1), &[(Channel::Altitude, i as f64)])
                .unwrap();
        }

        let at = start() + Duration::seconds(31);
        buffer.append(Channel::Altitude, 123.0, at).unwrap();

        let snapshot = buffer.snapshot();
        let altitude = snapshot.channel(Channel::Altitude).unwrap();
        assert_eq!(altitude.len(), 30);
        assert_eq!(altitude[0], 1.0);
        assert_eq!(*altitude.last().unwrap(), 123.0);
        assert_eq!(snapshot.labels.last().unwrap(), "12:00:31");
        assert_eq!(snapshot.labels[0], "12:00:02");
    }

    #[test]
    fn test_lengths_stay_equal() {
        let mut buffer = seeded_buffer();
        let renders = Arc::new(Mutex::new(Vec::new()));
        buffer.attach(Box::new(CountingRenderer(renders.clone())));

        for i in 0..45 {
            let at = start() + Duration::seconds(i + 1);
            // partial frames leave the remaining channels to carry forward
            buffer.append(Channel::GyroYaw, i as f64, at).unwrap();
            let snapshot = buffer.snapshot();
            assert_eq!(snapshot.labels.len(), 30);
            for series in snapshot.series.values() {
                assert_eq!(series.len(), snapshot.labels.len());
            }
        }

        let renders = renders.lock().unwrap();
        assert_eq!(renders.len(), 45);
        for (labels, lengths) in renders.iter() {
            assert_eq!(*labels, 30);
            assert!(lengths.iter().all(|len| len == labels));
        }
    }

    #[test]
    fn test_missing_channel_carries_forward() {
        let mut buffer = seeded_buffer();
        buffer.append(Channel::Velocity, 5.0, start()).unwrap();
        let snapshot = buffer.snapshot();
        assert_eq!(*snapshot.channel(Channel::AccelZ).unwrap().last().unwrap(), 1.0);
        assert_eq!(*snapshot.channel(Channel::Velocity).unwrap().last().unwrap(), 5.0);
    }

    #[test]
    fn test_unknown_channel_leaves_buffer_untouched() {
        let mut buffer = RollingChartBuffer::new(DEFAULT_CHART_WINDOW);
        let mut rng = StdRng::seed_from_u64(3);
        buffer.initialize(&[Channel::Altitude], start(), &mut rng);

        let before = buffer.snapshot();
        let result = buffer.append_frame(
            start(),
            &[(Channel::Altitude, 1.0), (Channel::GyroRoll, 2.0)],
        );
        assert_eq!(result, Err(StationError::UnknownChannel("gyro_roll".to_string())));
        assert_eq!(buffer.snapshot(), before);
    }
}
