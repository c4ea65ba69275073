//! Tram departure board server.
//!
//! A small web service that answers: "when does the next tram to CERN
//! leave?" It queries the Swiss open data stop event API for one stop and
//! returns the departures of one line, as JSON or as a German sentence.

pub mod board;
pub mod config;
pub mod domain;
pub mod upstream;
pub mod web;
