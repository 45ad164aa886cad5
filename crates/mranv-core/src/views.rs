//! View routing and read-only projections over the telemetry state

use crate::telemetry::TelemetryState;
use crate::types::{ComponentStatus, ThreatLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Navigation key of a dashboard view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKey {
    /// Aggregate banner and summary cards
    #[default]
    Overview,
    /// One detail panel per component
    Components,
    /// Static charts and recent events
    Analytics,
}

impl ViewKey {
    /// Every view in navigation order
    pub const ALL: [Self; 3] = [Self::Overview, Self::Components, Self::Analytics];

    /// Resolve a navigation key, falling back to the overview
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "components" => Self::Components,
            "analytics" => Self::Analytics,
            _ => Self::Overview,
        }
    }

    /// Navigation key
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Components => "components",
            Self::Analytics => "analytics",
        }
    }

    /// Navigation label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Components => "Components",
            Self::Analytics => "Analytics",
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the side navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// View this entry selects
    pub key: ViewKey,
    /// Display label
    pub label: &'static str,
    /// Whether this entry is the active view
    pub selected: bool,
}

/// Side navigation with `selected` highlighted
pub fn navigation(selected: ViewKey) -> Vec<NavItem> {
    ViewKey::ALL
        .iter()
        .map(|&key| NavItem {
            key,
            label: key.label(),
            selected: key == selected,
        })
        .collect()
}

/// Aggregate status shown on top of the overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBanner {
    /// Number of components
    pub total: usize,
    /// Components reporting `active`
    pub active: usize,
    /// Components currently scanning
    pub scanning: usize,
    /// Sum of detections
    pub total_detections: u64,
    /// Sum of today's events
    pub events_today: u64,
    /// Highest threat level across components
    pub highest_threat: Option<ThreatLevel>,
    /// One-line summary
    pub headline: String,
}

/// Summary card for one component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
    /// Component name
    pub name: String,
    /// Threat level
    pub threat_level: ThreatLevel,
    /// Detection counter
    pub detections: u64,
    /// CPU gauge
    pub cpu: f64,
    /// Memory gauge
    pub memory: f64,
    /// Scanning flag
    pub scanning: bool,
}

impl From<&ComponentStatus> for ComponentSummary {
    fn from(component: &ComponentStatus) -> Self {
        Self {
            name: component.name.clone(),
            threat_level: component.threat_level,
            detections: component.detections,
            cpu: component.cpu,
            memory: component.memory,
            scanning: component.scanning,
        }
    }
}

/// Overview projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewProjection {
    /// Aggregate banner
    pub banner: StatusBanner,
    /// One card per component
    pub cards: Vec<ComponentSummary>,
    /// Scan progress in percent
    pub scan_progress: u8,
}

/// Components projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentsProjection {
    /// Full record per component
    pub panels: Vec<ComponentStatus>,
    /// Time of the most recent update across components
    pub last_update: Option<DateTime<Utc>>,
}

/// Detections reported for one weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyDetections {
    /// Short weekday name
    pub day: &'static str,
    /// Detection count
    pub detections: u64,
}

/// A row of the recent events table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecentEvent {
    /// Wall-clock time of day
    pub time: &'static str,
    /// Component that raised the event
    pub component: &'static str,
    /// What happened
    pub description: &'static str,
    /// Severity
    pub severity: ThreatLevel,
}

/// Analytics projection
///
/// The figures are fixed and do not follow the live records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsProjection {
    /// Detections per weekday
    pub daily_detections: Vec<DailyDetections>,
    /// Recent events, newest first
    pub recent_events: Vec<RecentEvent>,
}

impl AnalyticsProjection {
    /// Largest daily value, used to scale the chart
    pub fn peak(&self) -> u64 {
        self.daily_detections
            .iter()
            .map(|d| d.detections)
            .max()
            .unwrap_or(0)
    }
}

const DAILY_DETECTIONS: [DailyDetections; 7] = [
    DailyDetections { day: "Mon", detections: 45 },
    DailyDetections { day: "Tue", detections: 52 },
    DailyDetections { day: "Wed", detections: 38 },
    DailyDetections { day: "Thu", detections: 65 },
    DailyDetections { day: "Fri", detections: 48 },
    DailyDetections { day: "Sat", detections: 23 },
    DailyDetections { day: "Sun", detections: 31 },
];

const RECENT_EVENTS: [RecentEvent; 5] = [
    RecentEvent {
        time: "14:32:15",
        component: "File Integrity Monitoring",
        description: "Unauthorized change to /etc/passwd",
        severity: ThreatLevel::High,
    },
    RecentEvent {
        time: "14:28:42",
        component: "Vulnerability Detector",
        description: "CVE-2024-1234 found in openssl package",
        severity: ThreatLevel::Critical,
    },
    RecentEvent {
        time: "14:15:08",
        component: "Log Analysis",
        description: "Repeated failed SSH logins from 10.0.0.45",
        severity: ThreatLevel::Medium,
    },
    RecentEvent {
        time: "13:58:33",
        component: "Rootkit Detection",
        description: "Hidden process scan completed",
        severity: ThreatLevel::Low,
    },
    RecentEvent {
        time: "13:45:21",
        component: "Security Configuration Assessment",
        description: "SSH root login enabled",
        severity: ThreatLevel::Medium,
    },
];

/// Read-only projection of one view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Projection {
    /// Overview
    Overview(OverviewProjection),
    /// Components
    Components(ComponentsProjection),
    /// Analytics
    Analytics(AnalyticsProjection),
}

impl Projection {
    /// View this projection belongs to
    pub const fn key(&self) -> ViewKey {
        match self {
            Self::Overview(_) => ViewKey::Overview,
            Self::Components(_) => ViewKey::Components,
            Self::Analytics(_) => ViewKey::Analytics,
        }
    }
}

/// Project `state` for the view `key`
pub fn project(key: ViewKey, state: &TelemetryState) -> Projection {
    match key {
        ViewKey::Overview => Projection::Overview(overview(state)),
        ViewKey::Components => Projection::Components(ComponentsProjection {
            panels: state.components.clone(),
            last_update: state.components.iter().map(|c| c.last_update).max(),
        }),
        ViewKey::Analytics => Projection::Analytics(analytics()),
    }
}

/// Fixed analytics figures
pub fn analytics() -> AnalyticsProjection {
    AnalyticsProjection {
        daily_detections: DAILY_DETECTIONS.to_vec(),
        recent_events: RECENT_EVENTS.to_vec(),
    }
}

fn overview(state: &TelemetryState) -> OverviewProjection {
    let components = &state.components;
    let total = components.len();
    let active = components
        .iter()
        .filter(|c| c.status == crate::types::ComponentState::Active)
        .count();

    let headline = if active == total {
        "All security components operational".to_string()
    } else {
        format!("{active} of {total} components active")
    };

    OverviewProjection {
        banner: StatusBanner {
            total,
            active,
            scanning: components.iter().filter(|c| c.scanning).count(),
            total_detections: components.iter().map(|c| c.detections).sum(),
            events_today: components.iter().map(|c| c.events_today).sum(),
            highest_threat: components.iter().map(|c| c.threat_level).max(),
            headline,
        },
        cards: components.iter().map(ComponentSummary::from).collect(),
        scan_progress: state.scan_progress,
    }
}
