//! Per-leg routing and provider-response normalization.
//!
//! Given two resolved points and a transport mode, obtains distance,
//! duration and step detail from the relevant direction endpoint and
//! reconciles the structurally different payloads (single best path vs.
//! multi-leg transit itinerary) into one [`Segment`] shape.
//!
//! [`Segment`]: crate::domain::Segment

mod convert;
mod router;

pub use convert::{normalize_path, normalize_transit};
pub use router::{DirectionsProvider, SegmentRouter};
