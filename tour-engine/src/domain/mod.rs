//! Core domain types for the tour engine.
//!
//! These types are the normalized model that the provider clients decode
//! into. They carry no provider-specific structure.

mod error;
mod mode;
mod point;
mod segment;
mod tour;

pub use error::RouteError;
pub use mode::{Preference, Strategy, TransportMode, UnknownMode};
pub use point::{Point, haversine_km, planar_deg};
pub use segment::{Segment, StationRef, TrainInfo};
pub use tour::{Tour, TourLeg};
