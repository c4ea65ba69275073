//! German sentence describing the next departures.
//!
//! Produces sentences like "Die nächsten Trams zum CERN kommen in
//! 3 Minuten und einer Minute" from a list of departures.

use chrono::{DateTime, Utc};

use super::Departure;

/// Lead-in when exactly one departure is described.
pub const SINGULAR_LEAD_IN: &str = "Die nächste Tram zum CERN kommt in";

/// Lead-in when several departures are described.
pub const PLURAL_LEAD_IN: &str = "Die nächsten Trams zum CERN kommen in";

/// Sentence returned when there is nothing to describe.
pub const NO_DEPARTURES: &str = "Zurzeit fährt keine Tram zum CERN.";

/// Describe the first `count` departures as a German sentence.
///
/// `departures` must be in chronological order. Each departure is reported
/// as whole minutes from `now` until its effective time, rounded down.
/// Departures already in the past produce negative minute counts.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use tram_board::domain::{Departure, describe_departures};
///
/// let now = Utc.with_ymd_and_hms(2024, 12, 20, 13, 40, 0).unwrap();
/// let deps = vec![
///     Departure::new("18", "CERN", now + Duration::minutes(3), None),
///     Departure::new("18", "CERN", now + Duration::minutes(7), None),
/// ];
///
/// assert_eq!(
///     describe_departures(&deps, 2, now),
///     "Die nächsten Trams zum CERN kommen in 3 Minuten und 7 Minuten",
/// );
/// ```
pub fn describe_departures(departures: &[Departure], count: usize, now: DateTime<Utc>) -> String {
    let included = &departures[..count.min(departures.len())];

    if included.is_empty() {
        return NO_DEPARTURES.to_string();
    }

    let lead_in = if included.len() == 1 {
        SINGULAR_LEAD_IN
    } else {
        PLURAL_LEAD_IN
    };

    let fragments: Vec<String> = included
        .iter()
        .map(|dep| render_minutes(minutes_until(dep.effective_time(), now)))
        .collect();

    format!("{lead_in} {}", join_fragments(&fragments))
}

/// Whole minutes from `now` until `at`, rounded toward negative infinity.
///
/// 90 seconds away is 1 minute; half a second ago is -1 minute.
pub fn minutes_until(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta = at - now;
    // num_seconds truncates toward zero; step down for a negative remainder
    let mut secs = delta.num_seconds();
    if delta.subsec_nanos() < 0 {
        secs -= 1;
    }
    secs.div_euclid(60)
}

/// Render a minute count: `1` is "einer Minute", anything else "N Minuten".
pub fn render_minutes(minutes: i64) -> String {
    if minutes == 1 {
        "einer Minute".to_string()
    } else {
        format!("{minutes} Minuten")
    }
}

/// Join fragments as "A, B und C".
///
/// A single fragment is returned as-is; an empty slice yields an empty string.
pub fn join_fragments(fragments: &[String]) -> String {
    match fragments {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} und {last}", init.join(", ")),
    }
}
