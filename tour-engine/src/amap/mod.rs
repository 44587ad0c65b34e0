//! Amap (高德) REST API client.
//!
//! This module provides an HTTP client for the Amap web-service APIs used
//! by the engine: POI keyword search, geocoding, and route planning.
//!
//! Key characteristics of the Amap APIs:
//! - Coordinates are `"lng,lat"` strings, longitude first
//! - Numeric fields arrive as JSON strings in V3/V5 responses
//! - V3/V5 report errors via `status == "0"` + `info`; the V4 cycling
//!   endpoint uses `errcode` instead and nests its payload under `data`
//!   rather than `route`

mod client;
mod error;
mod types;

pub use client::{AmapClient, AmapConfig, PathMode};
pub use error::AmapError;
pub use types::{
    BusDto, BuslineDto, DirectionsResponse, GeocodeDto, GeocodeResponse, PathDto, PoiDto,
    PoiSearchResponse, RailwayDto, StepDto, StopDto, TransitDto, TransitSegmentDto, WalkingDto,
    parse_coord,
};
