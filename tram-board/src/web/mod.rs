//! Web layer for the departure board.
//!
//! Provides HTTP endpoints returning departures as JSON or as a sentence.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
