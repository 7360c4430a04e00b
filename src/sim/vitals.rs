//! Simulated vital-sign time series.
//!
//! Everything rendered on the vitals tab comes from here: a window of
//! synthetic chart samples rolled on a slow timer, and a set of per-metric
//! reading cards whose values follow a bounded random walk on a fast
//! timer. Both windows have strict FIFO semantics with a fixed length.
//!
//! All generation is parameterized on the caller's random source and
//! clock, so tests can drive it with a seeded [`rand::rngs::StdRng`] and a
//! fixed timestamp and assert exact outputs.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use rand::Rng;
use serde::Serialize;

use super::ward::BedStatus;

/// Number of samples held by the chart window.
pub const CHART_WINDOW: usize = 12;
/// Number of points held by each reading card's trend window.
pub const TREND_WINDOW: usize = 6;
/// Minutes between the synthetic timestamps of the initial chart samples.
pub const LABEL_STEP_MINUTES: i64 = 5;
/// Maximum distance a single walk step can move a card value.
const WALK_SPAN: f64 = 2.5;

/// One synthetic multi-metric sample on the chart timeline.
///
/// Immutable once drawn; the window owns ordering.
#[derive(Debug, Clone, Serialize)]
pub struct VitalSample {
    /// Localized HH:MM label for the x axis.
    pub time: String,
    pub heart_rate: f64,
    pub blood_pressure: f64,
    pub oxygen_sat: f64,
    pub temperature: f64,
}

impl VitalSample {
    fn draw<R: Rng>(rng: &mut R, label: String) -> Self {
        Self {
            time: label,
            heart_rate: rng.gen_range(70.0..80.0),
            blood_pressure: rng.gen_range(115.0..125.0),
            oxygen_sat: rng.gen_range(96.0..99.0),
            temperature: rng.gen_range(36.8..37.4),
        }
    }
}

/// Fixed-length FIFO window of chart samples, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct VitalSeriesWindow {
    samples: VecDeque<VitalSample>,
}

impl VitalSeriesWindow {
    /// Produce a full window of `size` samples.
    ///
    /// Sample `i` (0-indexed from the oldest) is labelled
    /// `now - (size - 1 - i) * 5min`, so the newest sample carries the
    /// current time.
    pub fn generate<R: Rng>(rng: &mut R, now: DateTime<Local>, size: usize) -> Self {
        let samples = (0..size)
            .map(|i| {
                let offset = (size - 1 - i) as i64 * LABEL_STEP_MINUTES;
                let stamp = now - chrono::Duration::minutes(offset);
                VitalSample::draw(rng, stamp.format("%H:%M").to_string())
            })
            .collect();
        Self { samples }
    }

    /// Evict the oldest sample and append a freshly drawn one.
    ///
    /// The window length is invariant under ticking.
    pub fn tick<R: Rng>(&mut self, rng: &mut R, now: DateTime<Local>) {
        self.samples.pop_front();
        self.samples.push_back(VitalSample::draw(rng, now.format("%H:%M").to_string()));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VitalSample> {
        self.samples.iter()
    }

    /// Newest sample in the window, if any.
    pub fn latest(&self) -> Option<&VitalSample> {
        self.samples.back()
    }
}

/// Inclusive normal range for a metric.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Single bounded random-walk step: move by uniform(-2.5, 2.5), clamp
/// into `[min, max]`, round to one decimal.
///
/// The clamp runs before rounding, and rounding to one decimal cannot
/// carry a clamped value past a one-decimal bound, so the result is
/// always inside the band.
pub fn step<R: Rng>(rng: &mut R, value: f64, min: f64, max: f64) -> f64 {
    let delta = rng.gen_range(-WALK_SPAN..WALK_SPAN);
    let next = (value + delta).clamp(min, max);
    (next * 10.0).round() / 10.0
}

/// Per-metric card state: current value plus a short trend window.
#[derive(Debug, Clone, Serialize)]
pub struct VitalReading {
    pub id: &'static str,
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub normal: Band,
    /// Last `TREND_WINDOW` values, oldest first.
    pub trend: VecDeque<f64>,
}

impl VitalReading {
    fn seeded(
        id: &'static str,
        name: &'static str,
        value: f64,
        unit: &'static str,
        normal: Band,
        trend: [f64; TREND_WINDOW],
    ) -> Self {
        Self {
            id,
            name,
            value,
            unit,
            normal,
            trend: trend.into_iter().collect(),
        }
    }

    pub fn is_normal(&self) -> bool {
        self.normal.contains(self.value)
    }

    /// Advance the walk by one step and roll the trend window.
    pub fn walk<R: Rng>(&mut self, rng: &mut R) {
        let next = step(rng, self.value, self.normal.min, self.normal.max);
        self.value = next;
        self.trend.pop_front();
        self.trend.push_back(next);
    }
}

/// All simulated state behind the vitals tab.
#[derive(Debug, Clone, Serialize)]
pub struct VitalsBoard {
    pub readings: Vec<VitalReading>,
    pub chart: VitalSeriesWindow,
}

impl VitalsBoard {
    pub fn new<R: Rng>(rng: &mut R, now: DateTime<Local>) -> Self {
        Self {
            readings: seed_readings(),
            chart: VitalSeriesWindow::generate(rng, now, CHART_WINDOW),
        }
    }

    /// Fast timer: advance every reading card by one walk step.
    pub fn tick_cards<R: Rng>(&mut self, rng: &mut R) {
        for reading in &mut self.readings {
            reading.walk(rng);
        }
    }

    /// Slow timer: roll the chart window by one sample.
    pub fn tick_chart<R: Rng>(&mut self, rng: &mut R, now: DateTime<Local>) {
        self.chart.tick(rng, now);
    }

    pub fn reading(&self, id: &str) -> Option<&VitalReading> {
        self.readings.iter().find(|r| r.id == id)
    }
}

/// Initial card set: values, units, normal bands and seed trends.
fn seed_readings() -> Vec<VitalReading> {
    vec![
        VitalReading::seeded(
            "hr",
            "Heart Rate",
            72.0,
            "bpm",
            Band { min: 60.0, max: 100.0 },
            [70.0, 68.0, 72.0, 75.0, 71.0, 72.0],
        ),
        VitalReading::seeded(
            "temp",
            "Temperature",
            37.2,
            "°C",
            Band { min: 36.1, max: 37.2 },
            [37.0, 37.1, 37.2, 37.1, 37.2, 37.2],
        ),
        VitalReading::seeded(
            "bp",
            "Blood Pressure",
            120.0,
            "mmHg",
            Band { min: 90.0, max: 140.0 },
            [118.0, 120.0, 122.0, 119.0, 121.0, 120.0],
        ),
        VitalReading::seeded(
            "rr",
            "Respiratory Rate",
            16.0,
            "breaths/min",
            Band { min: 12.0, max: 20.0 },
            [15.0, 16.0, 15.0, 17.0, 16.0, 16.0],
        ),
        VitalReading::seeded(
            "spo2",
            "Oxygen Saturation",
            98.0,
            "%",
            Band { min: 95.0, max: 100.0 },
            [97.0, 98.0, 98.0, 97.0, 98.0, 98.0],
        ),
    ]
}

/// Fixed patient strip shown above the cards.
///
/// Selection only moves the highlight; the generators are ward-wide.
#[derive(Debug, Clone, Copy)]
pub struct MonitoredPatient {
    pub id: &'static str,
    pub name: &'static str,
    pub room: &'static str,
    pub status: BedStatus,
}

pub const MONITORED_PATIENTS: &[MonitoredPatient] = &[
    MonitoredPatient {
        id: "P001",
        name: "John Smith",
        room: "101",
        status: BedStatus::Stable,
    },
    MonitoredPatient {
        id: "P002",
        name: "Emma Wilson",
        room: "102",
        status: BedStatus::Critical,
    },
    MonitoredPatient {
        id: "P003",
        name: "Michael Brown",
        room: "103",
        status: BedStatus::Stable,
    },
    MonitoredPatient {
        id: "P004",
        name: "Sarah Davis",
        room: "104",
        status: BedStatus::Observation,
    },
];

/// Severity of a recent-alerts entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Info,
}

/// Canned entries for the recent-alerts panel.
#[derive(Debug, Clone, Copy)]
pub struct WardAlert {
    pub kind: AlertKind,
    pub title: &'static str,
    pub detail: &'static str,
}

pub const RECENT_ALERTS: &[WardAlert] = &[
    WardAlert {
        kind: AlertKind::Warning,
        title: "Elevated Heart Rate",
        detail: "Patient P002 - Emma Wilson - Heart rate at 105 bpm (10 mins ago)",
    },
    WardAlert {
        kind: AlertKind::Info,
        title: "Vitals Normalized",
        detail: "Patient P001 - John Smith - All vitals within normal range (15 mins ago)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_window_length_and_labels() {
        let mut rng = StdRng::seed_from_u64(7);
        let window = VitalSeriesWindow::generate(&mut rng, noon(), CHART_WINDOW);

        assert_eq!(window.len(), CHART_WINDOW);
        let labels: Vec<&str> = window.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(labels.first().copied(), Some("11:05"));
        assert_eq!(labels.last().copied(), Some("12:00"));
    }

    #[test]
    fn test_generate_draws_within_metric_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let window = VitalSeriesWindow::generate(&mut rng, noon(), CHART_WINDOW);

        for sample in window.iter() {
            assert!((70.0..80.0).contains(&sample.heart_rate));
            assert!((115.0..125.0).contains(&sample.blood_pressure));
            assert!((96.0..99.0).contains(&sample.oxygen_sat));
            assert!((36.8..37.4).contains(&sample.temperature));
        }
    }

    #[test]
    fn test_tick_is_a_strict_fifo_shift() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut window = VitalSeriesWindow::generate(&mut rng, noon(), CHART_WINDOW);
        let before: Vec<f64> = window.iter().map(|s| s.heart_rate).collect();

        let later = noon() + chrono::Duration::minutes(5);
        window.tick(&mut rng, later);

        assert_eq!(window.len(), CHART_WINDOW);
        let after: Vec<f64> = window.iter().map(|s| s.heart_rate).collect();
        assert_eq!(&after[..CHART_WINDOW - 1], &before[1..]);
        assert_eq!(window.latest().unwrap().time, "12:05");
    }

    #[test]
    fn test_step_never_leaves_the_band() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut value = 60.0;
        for _ in 0..1000 {
            value = step(&mut rng, value, 60.0, 100.0);
            assert!((60.0..=100.0).contains(&value), "escaped band: {}", value);
        }
    }

    #[test]
    fn test_step_rounds_to_one_decimal() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let value = step(&mut rng, 72.0, 60.0, 100.0);
            assert_eq!((value * 10.0).round() / 10.0, value);
        }
    }

    #[test]
    fn test_step_is_deterministic_per_seed() {
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        assert_eq!(step(&mut a, 72.0, 60.0, 100.0), step(&mut b, 72.0, 60.0, 100.0));
    }

    #[test]
    fn test_board_mounts_with_seed_trends() {
        let mut rng = StdRng::seed_from_u64(11);
        let board = VitalsBoard::new(&mut rng, noon());

        let hr = board.reading("hr").unwrap();
        assert_eq!(hr.trend.len(), TREND_WINDOW);
        assert!(hr.trend.iter().all(|v| (60.0..=100.0).contains(v)));
        assert_eq!(board.readings.len(), 5);
        assert_eq!(board.chart.len(), CHART_WINDOW);
    }

    #[test]
    fn test_card_tick_rolls_trend_and_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = VitalsBoard::new(&mut rng, noon());
        let head = *board.reading("hr").unwrap().trend.front().unwrap();

        board.tick_cards(&mut rng);

        let hr = board.reading("hr").unwrap();
        assert_eq!(hr.trend.len(), TREND_WINDOW);
        assert_ne!(*hr.trend.front().unwrap(), head, "oldest point not evicted");
        assert!(hr.normal.contains(hr.value));
        assert_eq!(*hr.trend.back().unwrap(), hr.value);
    }

    #[test]
    fn test_reading_out_of_band_predicate() {
        let mut reading = seed_readings().remove(0);
        assert!(reading.is_normal());
        reading.value = 105.0;
        assert!(!reading.is_normal());
    }
}
