//! Simulated component telemetry
//!
//! Six fabricated security-component records are perturbed on every tick. The
//! generator itself never touches a clock or a timer; the dashboard shell owns
//! the cadence and hands `now` in, which keeps every step reproducible under a
//! fixed seed.

use crate::types::{ComponentState, ComponentStatus, ThreatLevel, ToastColor, ToastNotice};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Number of records in every session
pub const COMPONENT_COUNT: usize = 6;

/// Amount the scan progress advances per tick
pub const SCAN_PROGRESS_STEP: u8 = 2;

/// `(name, scanning, threat, detections, cpu, memory, events_today)`
type SeedRow = (&'static str, bool, ThreatLevel, u64, f64, f64, u64);

const SEED: [SeedRow; COMPONENT_COUNT] = [
    ("File Integrity Monitoring", true, ThreatLevel::Low, 1247, 23.5, 45.2, 89),
    ("Rootkit Detection", true, ThreatLevel::Medium, 342, 15.8, 32.1, 12),
    ("Vulnerability Detector", true, ThreatLevel::High, 856, 42.3, 58.7, 156),
    ("Log Analysis", true, ThreatLevel::Low, 5621, 67.2, 71.4, 892),
    ("Active Response", false, ThreatLevel::Critical, 178, 8.4, 21.6, 7),
    (
        "Security Configuration Assessment",
        false,
        ThreatLevel::Medium,
        429,
        12.1,
        28.9,
        34,
    ),
];

/// Build the six seed records, all stamped with `now`
pub fn seed_components(now: DateTime<Utc>) -> Vec<ComponentStatus> {
    SEED.iter()
        .map(
            |&(name, scanning, threat_level, detections, cpu, memory, events_today)| {
                ComponentStatus {
                    name: name.to_string(),
                    status: ComponentState::Active,
                    last_update: now,
                    detections,
                    cpu,
                    memory,
                    scanning,
                    threat_level,
                    events_today,
                }
            },
        )
        .collect()
}

/// Mutable telemetry owned by one dashboard session
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryState {
    /// Component records, fixed in number and order
    pub components: Vec<ComponentStatus>,

    /// Scan progress in `[0, 100)`
    pub scan_progress: u8,
}

impl TelemetryState {
    /// Fresh state for a newly mounted session
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            components: seed_components(now),
            scan_progress: 0,
        }
    }
}

/// What a single tick produced besides the in-place mutation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Name of the component a notification should be raised for
    pub alert: Option<String>,
}

/// Random walk over [`TelemetryState`]
#[derive(Debug)]
pub struct TelemetryGenerator {
    rng: StdRng,
    toast_probability: f64,
}

impl TelemetryGenerator {
    /// Create a generator
    ///
    /// A `seed` makes every tick sequence reproducible. The toast probability
    /// is clamped to `[0, 1]`; NaN is treated as zero.
    pub fn new(seed: Option<u64>, toast_probability: f64) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let toast_probability = if toast_probability.is_nan() {
            0.0
        } else {
            toast_probability.clamp(0.0, 1.0)
        };
        Self {
            rng,
            toast_probability,
        }
    }

    /// Advance every record by one step
    pub fn tick(&mut self, state: &mut TelemetryState, now: DateTime<Utc>) -> TickReport {
        for component in &mut state.components {
            if component.scanning {
                component.detections = component
                    .detections
                    .saturating_add(self.rng.gen_range(0..=2));
                component.events_today = component
                    .events_today
                    .saturating_add(self.rng.gen_range(0..=1));
            }
            component.cpu = clamp_gauge(component.cpu + self.rng.gen_range(-3.0..=3.0));
            component.memory = clamp_gauge(component.memory + self.rng.gen_range(-2.0..=2.0));
            component.last_update = now;
        }

        state.scan_progress = advance_progress(state.scan_progress);

        let alert = if self.rng.gen_bool(self.toast_probability) {
            state
                .components
                .choose(&mut self.rng)
                .map(|component| component.name.clone())
        } else {
            None
        };

        TickReport { alert }
    }
}

/// Toast raised when a tick picks a component
pub fn event_toast(id: u64, component: &str) -> ToastNotice {
    ToastNotice::new(
        id,
        format!("{component}: new security event detected"),
        ToastColor::Warning,
    )
}

fn clamp_gauge(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

const fn advance_progress(progress: u8) -> u8 {
    (progress + SCAN_PROGRESS_STEP) % 100
}
