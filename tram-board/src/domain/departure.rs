//! Departure types.
//!
//! A `Departure` is one filtered stop event from the upstream board, reduced
//! to the four fields we expose: line, destination and the two departure
//! times. Times are always held in UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One departure of the configured line towards the configured destination.
///
/// `line` and `destination` are never empty: the parser only builds a
/// `Departure` for events whose line equals the target line and whose
/// destination contains the target substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    /// Published line name (e.g., "18")
    pub line: String,
    /// Destination text as shown on the vehicle
    pub destination: String,
    /// Scheduled departure time
    pub timetabled: DateTime<Utc>,
    /// Real-time estimate, if the upstream refined the scheduled time
    #[serde(default)]
    pub estimated: Option<DateTime<Utc>>,
}

/// Departures in upstream document order.
///
/// The upstream returns events chronologically; the list is neither
/// re-sorted nor deduplicated.
pub type DepartureList = Vec<Departure>;

impl Departure {
    /// Create a departure.
    pub fn new(
        line: impl Into<String>,
        destination: impl Into<String>,
        timetabled: DateTime<Utc>,
        estimated: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            line: line.into(),
            destination: destination.into(),
            timetabled,
            estimated,
        }
    }

    /// The best known departure time: the estimate if there is one,
    /// otherwise the timetabled time.
    pub fn effective_time(&self) -> DateTime<Utc> {
        self.estimated.unwrap_or(self.timetabled)
    }

    /// Whether real-time data is available for this departure.
    pub fn is_realtime(&self) -> bool {
        self.estimated.is_some()
    }
}
