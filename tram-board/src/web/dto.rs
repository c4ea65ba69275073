//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Departure;

/// Number of departures described when `num` is not given.
pub const DEFAULT_TEXT_COUNT: usize = 2;

/// Response listing all departures.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeparturesResponse {
    /// Departures in upstream order
    pub departures: Vec<Departure>,
}

/// Query for the text endpoint.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    /// How many departures to describe (defaults to 2)
    pub num: Option<usize>,
}

impl TextRequest {
    /// Requested count, falling back to the default.
    pub fn count(&self) -> usize {
        self.num.unwrap_or(DEFAULT_TEXT_COUNT)
    }
}

/// Response with the generated sentence.
#[derive(Debug, Serialize, Deserialize)]
pub struct TextResponse {
    /// German sentence describing the next departures
    pub text: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
