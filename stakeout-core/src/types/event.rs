//! Enforcement stop events and the immutable per-run event set.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::EventError;

/// One geo-tagged enforcement stop.
///
/// Temporal fields are derived from the UTC timestamp at construction;
/// `day_of_week` is Monday-first (0=Monday..6=Sunday). Records are immutable
/// for the duration of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopEvent {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: DateTime<Utc>,
    pub hour: u8,
    pub day_of_week: u8,
    pub month: u8,
    pub day_of_month: u8,
    pub detection_method: String,
    #[serde(default)]
    pub speed_over: Option<f64>,
    #[serde(default)]
    pub alcohol_involved: bool,
    #[serde(default)]
    pub accident_involved: bool,
}

impl StopEvent {
    /// Build an event, deriving the temporal fields from the timestamp.
    ///
    /// An empty detection method label normalizes to `"unknown"`.
    pub fn new(
        lat: f64,
        lng: f64,
        timestamp: DateTime<Utc>,
        detection_method: impl Into<String>,
    ) -> Result<Self, EventError> {
        check_coordinates(lat, lng)?;
        let method = detection_method.into();
        Ok(Self {
            lat,
            lng,
            timestamp,
            hour: timestamp.hour() as u8,
            day_of_week: timestamp.weekday().num_days_from_monday() as u8,
            month: timestamp.month() as u8,
            day_of_month: timestamp.day() as u8,
            detection_method: if method.is_empty() {
                "unknown".to_string()
            } else {
                method
            },
            speed_over: None,
            alcohol_involved: false,
            accident_involved: false,
        })
    }

    /// Attach a recorded severity. Negative values are treated as absent.
    pub fn with_speed_over(mut self, speed_over: f64) -> Self {
        self.speed_over = (speed_over >= 0.0 && speed_over.is_finite()).then_some(speed_over);
        self
    }

    /// Attach the incident flags.
    pub fn with_flags(mut self, alcohol_involved: bool, accident_involved: bool) -> Self {
        self.alcohol_involved = alcohol_involved;
        self.accident_involved = accident_involved;
        self
    }

    /// True for Monday through Friday.
    pub fn is_weekday(&self) -> bool {
        self.day_of_week < 5
    }

    /// Validate coordinate and derived-field ranges.
    pub fn validate(&self) -> Result<(), EventError> {
        check_coordinates(self.lat, self.lng)?;
        if self.hour > 23 {
            return Err(EventError::InvalidHour { hour: self.hour });
        }
        if self.day_of_week > 6 {
            return Err(EventError::InvalidDayOfWeek {
                day_of_week: self.day_of_week,
            });
        }
        if !(1..=12).contains(&self.month) {
            return Err(EventError::InvalidMonth { month: self.month });
        }
        if !(1..=31).contains(&self.day_of_month) {
            return Err(EventError::InvalidDayOfMonth {
                day_of_month: self.day_of_month,
            });
        }
        Ok(())
    }
}

fn check_coordinates(lat: f64, lng: f64) -> Result<(), EventError> {
    let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
    let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
    if lat_ok && lng_ok {
        Ok(())
    } else {
        Err(EventError::InvalidCoordinate { lat, lng })
    }
}

/// The immutable snapshot of events for one analysis run.
///
/// Every record is validated up front; the reference time (maximum event
/// timestamp) anchors windowed detectors and output timestamps so identical
/// inputs produce identical results.
#[derive(Debug, Clone)]
pub struct EventSet {
    events: Vec<StopEvent>,
    reference_time: DateTime<Utc>,
}

impl EventSet {
    /// Validate and freeze a batch of events.
    pub fn from_events(events: Vec<StopEvent>) -> Result<Self, EventError> {
        if events.is_empty() {
            return Err(EventError::Empty);
        }
        for event in &events {
            event.validate()?;
        }
        let reference_time = events
            .iter()
            .map(|e| e.timestamp)
            .max()
            .ok_or(EventError::Empty)?;
        Ok(Self {
            events,
            reference_time,
        })
    }

    pub fn events(&self) -> &[StopEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Maximum event timestamp, the run's deterministic "now".
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StopEvent> {
        self.events.iter()
    }
}

impl<'a> IntoIterator for &'a EventSet {
    type Item = &'a StopEvent;
    type IntoIter = std::slice::Iter<'a, StopEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
