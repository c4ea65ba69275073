//! Domain types for the departure board.
//!
//! These types are independent of the upstream schema: the parser maps
//! whatever the upstream sends into a `Departure`, and everything else
//! works from there.

mod departure;
mod text;

pub use departure::{Departure, DepartureList};
pub use text::{
    NO_DEPARTURES, PLURAL_LEAD_IN, SINGULAR_LEAD_IN, describe_departures, join_fragments,
    minutes_until, render_minutes,
};
