//! Core data types for the `mranv` dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational state of a simulated component
///
/// Only `Active` is ever produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentState {
    /// Component is running
    #[default]
    Active,
}

impl ComponentState {
    /// Wire name of the state
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
        }
    }
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threat level assigned to a component at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    /// Low threat
    Low,
    /// Medium threat
    Medium,
    /// High threat
    High,
    /// Critical threat
    Critical,
}

impl ThreatLevel {
    /// Wire name of the level
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Badge color used when rendering the level
    pub const fn color(self) -> ToastColor {
        match self {
            Self::Low => ToastColor::Success,
            Self::Medium => ToastColor::Primary,
            Self::High => ToastColor::Warning,
            Self::Critical => ToastColor::Danger,
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One simulated security-component telemetry record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// Unique label
    pub name: String,

    /// Operational state
    pub status: ComponentState,

    /// Time of the most recent mutation
    #[serde(rename = "lastUpdate")]
    pub last_update: DateTime<Utc>,

    /// Detection counter, never decreases
    pub detections: u64,

    /// CPU gauge in `[0, 100]`
    pub cpu: f64,

    /// Memory gauge in `[0, 100]`
    pub memory: f64,

    /// Whether counters drift upward on each tick
    pub scanning: bool,

    /// Fixed threat level
    pub threat_level: ThreatLevel,

    /// Events counted today, never reset
    pub events_today: u64,
}

/// Color of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastColor {
    /// Neutral information
    Primary,
    /// Completed action
    Success,
    /// Needs attention
    Warning,
    /// Failure
    Danger,
}

impl ToastColor {
    /// Wire name of the color
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Ephemeral notification shown in the toast tray
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastNotice {
    /// Session-unique identifier used for scheduled removal
    pub id: u64,

    /// Headline
    pub title: String,

    /// Color
    pub color: ToastColor,

    /// Optional body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ToastNotice {
    /// Create a toast without body text
    pub fn new(id: u64, title: impl Into<String>, color: ToastColor) -> Self {
        Self {
            id,
            title: title.into(),
            color,
            text: None,
        }
    }

    /// Attach body text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// GIF shown next to the dashboard, replaced by the manual refresh action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showcase {
    /// Provider identifier
    pub id: String,

    /// Embeddable URL
    pub embed_url: String,
}

/// GIF shown before the first successful refresh
pub const DEFAULT_SHOWCASE_ID: &str = "13ByqbM0hgfN7y";

impl Showcase {
    /// Build the embeddable showcase for a GIF id
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            embed_url: format!("https://giphy.com/embed/{id}"),
            id,
        }
    }

    /// Attribution link for the GIF
    pub fn page_url(&self) -> String {
        format!("https://giphy.com/gifs/{}", self.id)
    }
}

impl Default for Showcase {
    fn default() -> Self {
        Self::from_id(DEFAULT_SHOWCASE_ID)
    }
}

/// Body of the timestamp endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampResponse {
    /// Server time in ISO-8601 form
    pub time: String,
}

impl TimestampResponse {
    /// Render a point in time the way the endpoint reports it
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            time: time.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }

    /// Parse the reported time
    ///
    /// # Errors
    ///
    /// Returns an error if `time` is not RFC 3339.
    pub fn parse(&self) -> crate::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.time)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| crate::Error::invalid_response("timestamp", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample_component() -> ComponentStatus {
        ComponentStatus {
            name: "Log Analysis".to_string(),
            status: ComponentState::Active,
            last_update: Utc.with_ymd_and_hms(2024, 3, 15, 14, 25, 30).unwrap(),
            detections: 5621,
            cpu: 67.2,
            memory: 71.4,
            scanning: true,
            threat_level: ThreatLevel::Low,
            events_today: 892,
        }
    }

    #[test]
    fn test_component_wire_format() {
        let value = serde_json::to_value(sample_component()).unwrap();

        assert_eq!(value["name"], "Log Analysis");
        assert_eq!(value["status"], "active");
        assert_eq!(value["lastUpdate"], "2024-03-15T14:25:30Z");
        assert_eq!(value["threat_level"], "low");
        assert_eq!(value["events_today"], 892);
        assert_eq!(value["scanning"], true);
    }

    #[test]
    fn test_threat_level_ordering() {
        assert!(ThreatLevel::Low < ThreatLevel::Medium);
        assert!(ThreatLevel::Medium < ThreatLevel::High);
        assert!(ThreatLevel::High < ThreatLevel::Critical);
        assert_eq!(
            [ThreatLevel::Medium, ThreatLevel::Critical, ThreatLevel::Low]
                .into_iter()
                .max(),
            Some(ThreatLevel::Critical)
        );
    }

    #[test]
    fn test_threat_level_display_and_color() {
        assert_eq!(ThreatLevel::High.to_string(), "high");
        assert_eq!(ThreatLevel::Critical.color(), ToastColor::Danger);
        assert_eq!(ThreatLevel::Low.color(), ToastColor::Success);
    }

    #[test]
    fn test_toast_serialization_skips_empty_text() {
        let toast = ToastNotice::new(3, "Data updated", ToastColor::Success);
        let json = serde_json::to_string(&toast).unwrap();
        assert_eq!(json, r#"{"id":3,"title":"Data updated","color":"success"}"#);

        let with_text = toast.with_text("done");
        let value = serde_json::to_value(&with_text).unwrap();
        assert_eq!(value["text"], "done");
    }

    #[test]
    fn test_default_showcase() {
        let showcase = Showcase::default();
        assert_eq!(showcase.id, DEFAULT_SHOWCASE_ID);
        assert_eq!(showcase.embed_url, "https://giphy.com/embed/13ByqbM0hgfN7y");
        assert_eq!(showcase.page_url(), "https://giphy.com/gifs/13ByqbM0hgfN7y");
    }

    #[test]
    fn test_timestamp_response_format() {
        let time = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let response = TimestampResponse::at(time);

        assert_eq!(response.time, "2024-01-02T03:04:05.000Z");
        assert_eq!(response.parse().unwrap(), time);
    }

    #[test]
    fn test_timestamp_response_parse_error() {
        let response = TimestampResponse {
            time: "yesterday".to_string(),
        };
        assert!(response.parse().is_err());
    }
}
