//! Tour construction.
//!
//! Resolves a batch of place names concurrently, orders them with a greedy
//! nearest-neighbour heuristic, and fills in per-leg segments under the
//! requested strategy, comparing driving against transit when asked.

mod builder;
mod order;

pub use builder::{SegmentQuote, TourBuilder, TourConfig, choose_preferred};
pub use order::greedy_order;
