//! Rail-schedule provider client and station resolution.
//!
//! Maps resolved points to rail-network station identities via fuzzy name
//! matching and queries a 12306-style ticket bridge for real train data.
//!
//! Key characteristics of the ticket provider:
//! - Stations are identified by telegraph-style codes, looked up by name
//! - It reports no route distance, so leg distance is approximated with
//!   the great-circle distance between the endpoints
//! - Today's departures may already have passed, so queries always target
//!   the following calendar day

mod client;
mod error;
mod resolver;
mod types;

pub use client::{RailClient, RailConfig};
pub use error::RailError;
pub use resolver::{RailProvider, RailResolver, departure_date, station_candidates};
pub use types::{PriceDto, StationDto, TicketDto};
