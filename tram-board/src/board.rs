//! Departure board queries.
//!
//! Ties the pieces together: build a request for the configured stop, send
//! it upstream, and parse the departures of the configured line towards
//! CERN out of the response.

use chrono::{DateTime, Local, Utc};
use tracing::{info, warn};

use crate::domain::{DepartureList, describe_departures};
use crate::upstream::{ParseError, Transport, UpstreamError, build_request, parse_departures};

/// Destination substring departures must contain.
pub const DESTINATION: &str = "CERN";

/// Default stop: Genève, Vieusseux.
pub const DEFAULT_STOP_REF: &str = "8592922";

/// Default line.
pub const DEFAULT_LINE: &str = "18";

/// Errors from a departure board query.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The upstream call failed
    #[error("upstream request failed: {0}")]
    Transport(#[from] UpstreamError),

    /// The upstream answered with a document we cannot use
    #[error("malformed upstream response: {0}")]
    MalformedResponse(#[from] ParseError),
}

/// Departure board for one stop and one line.
#[derive(Debug, Clone)]
pub struct DepartureBoard<T> {
    transport: T,
    stop: String,
    line: String,
}

impl<T: Transport> DepartureBoard<T> {
    /// Create a board for `line` at `stop`.
    pub fn new(transport: T, stop: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            transport,
            stop: stop.into(),
            line: line.into(),
        }
    }

    /// Stop identifier queried upstream.
    pub fn stop(&self) -> &str {
        &self.stop
    }

    /// Line departures are filtered on.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Fetch the upcoming departures towards CERN.
    pub async fn departures(&self) -> Result<DepartureList, BoardError> {
        self.departures_at(Local::now()).await
    }

    /// Fetch departures as of `now`.
    pub async fn departures_at(&self, now: DateTime<Local>) -> Result<DepartureList, BoardError> {
        let schema = self.transport.schema();
        let request = build_request(schema, &self.stop, now);

        let body = self.transport.post(request).await.inspect_err(|e| {
            warn!(stop = %self.stop, error = %e, "upstream request failed");
        })?;

        let departures =
            parse_departures(schema, &body, &self.line, DESTINATION).inspect_err(|e| {
                warn!(stop = %self.stop, error = %e, "malformed upstream response");
            })?;

        info!(
            stop = %self.stop,
            line = %self.line,
            count = departures.len(),
            realtime = departures.iter().filter(|d| d.is_realtime()).count(),
            "fetched departures"
        );
        Ok(departures)
    }

    /// Fetch departures and describe the next `count` of them in German.
    pub async fn describe(&self, count: usize) -> Result<String, BoardError> {
        let departures = self.departures().await?;
        Ok(describe_departures(&departures, count, Utc::now()))
    }
}
