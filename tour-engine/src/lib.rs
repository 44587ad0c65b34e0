//! Multi-modal route-resolution and tour-ordering engine.
//!
//! Given a set of human-readable place names, a city hint and a travel
//! strategy, produces an ordered visiting sequence with per-leg distance,
//! duration, transport mode and cost, by orchestrating place-search,
//! geocoding, turn-by-turn routing and rail-schedule providers and
//! reconciling their inconsistent response shapes into one model.

pub mod amap;
pub mod cost;
pub mod domain;
pub mod geo;
pub mod rail;
pub mod segment;
pub mod tour;
