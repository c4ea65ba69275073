//! opentransportdata.swiss stop event API.
//!
//! This module builds stop event requests, posts them to the open data
//! platform and parses the responses into departures.
//!
//! Key characteristics of the API:
//! - Requests and responses are XML (OJP 1.0 or TRIAS 1.1)
//! - The API key is sent verbatim in the `Authorization` header
//! - Response times are UTC (`...Z`), but the requested `DepArrTime` is
//!   local wall-clock time

mod client;
mod decode;
mod error;
mod parse;
mod request;
mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, Transport, UpstreamClient, UpstreamConfig};
pub use error::UpstreamError;
pub use parse::{ParseError, parse_departures};
pub use request::{NUMBER_OF_RESULTS, REQUESTOR_REF, build_request};
pub use schema::{FieldPaths, OJP_NS, SIRI_NS, Schema, TRIAS_NS, UnknownSchema};
