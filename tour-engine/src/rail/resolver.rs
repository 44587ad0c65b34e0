//! Station resolution and train lookup.
//!
//! POI names rarely match station registry names exactly ("Hangzhou East
//! Railway Station" vs "Hangzhou East"), so resolution generates candidate
//! names by stripping station suffixes, batches one code lookup for both
//! endpoints, and falls back to substring matching against the full
//! station list of the endpoint's city.

use std::collections::HashMap;

use chrono::{DateTime, Days, Local, NaiveDate};
use tracing::{debug, warn};

use crate::domain::{Point, StationRef, TrainInfo, haversine_km};

use super::client::RailClient;
use super::error::RailError;
use super::types::{StationDto, TicketDto};

/// Suffixes commonly appended to station-type POI names, longest first.
const STATION_SUFFIXES: &[&str] = &["Railway Station", "High-Speed Station", "Station"];

/// Trait for the rail ticket provider.
///
/// This abstraction allows the resolver to be tested with mock data.
pub trait RailProvider {
    fn station_codes(
        &self,
        names: &[String],
    ) -> impl Future<Output = Result<HashMap<String, StationDto>, RailError>> + Send;

    fn stations_in_city(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<Vec<StationDto>, RailError>> + Send;

    fn query_tickets(
        &self,
        date: NaiveDate,
        from_code: &str,
        to_code: &str,
    ) -> impl Future<Output = Result<Vec<TicketDto>, RailError>> + Send;
}

impl RailProvider for RailClient {
    async fn station_codes(
        &self,
        names: &[String],
    ) -> Result<HashMap<String, StationDto>, RailError> {
        RailClient::station_codes(self, names).await
    }

    async fn stations_in_city(&self, city: &str) -> Result<Vec<StationDto>, RailError> {
        RailClient::stations_in_city(self, city).await
    }

    async fn query_tickets(
        &self,
        date: NaiveDate,
        from_code: &str,
        to_code: &str,
    ) -> Result<Vec<TicketDto>, RailError> {
        RailClient::query_tickets(self, date, from_code, to_code).await
    }
}

/// The departure date to query: the following calendar day in local time.
///
/// Today's departures may already have passed, and time-of-day is not
/// otherwise modelled.
pub fn departure_date(now: DateTime<Local>) -> NaiveDate {
    now.date_naive() + Days::new(1)
}

/// Generate station-name candidates for a POI, most specific first.
///
/// The bare name (station suffixes stripped) comes first; for airport POIs
/// the shortened city plus "Airport" is also tried, since airport stations
/// are registered under the city rather than the terminal name.
pub fn station_candidates(poi_name: &str, city: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    let mut bare = poi_name.trim();
    for suffix in STATION_SUFFIXES {
        if let Some(stripped) = bare.strip_suffix(suffix) {
            bare = stripped.trim();
            break;
        }
    }
    if !bare.is_empty() {
        candidates.push(bare.to_string());
    }

    if poi_name.contains("Airport") && !city.is_empty() {
        let short = city.strip_suffix(" City").unwrap_or(city).trim();
        let airport = format!("{short} Airport");
        if !candidates.contains(&airport) {
            candidates.push(airport);
        }
    }

    if !poi_name.is_empty() && !candidates.iter().any(|c| c == poi_name) {
        candidates.push(poi_name.to_string());
    }

    candidates
}

/// Resolves points to stations and queries real train schedules.
#[derive(Debug, Clone)]
pub struct RailResolver<R> {
    provider: R,
}

impl<R: RailProvider> RailResolver<R> {
    pub fn new(provider: R) -> Self {
        Self { provider }
    }

    /// Find the best train between two resolved points.
    ///
    /// Queries tomorrow's schedule and picks the shortest reported
    /// duration. Any resolution or query failure is an error the caller
    /// treats as a soft fallback to generic transit, never a hard failure.
    pub async fn query_train(
        &self,
        origin: &Point,
        destination: &Point,
    ) -> Result<TrainInfo, RailError> {
        self.query_train_on(origin, destination, departure_date(Local::now()))
            .await
    }

    /// As [`query_train`], with an explicit travel date.
    ///
    /// [`query_train`]: RailResolver::query_train
    pub async fn query_train_on(
        &self,
        origin: &Point,
        destination: &Point,
        date: NaiveDate,
    ) -> Result<TrainInfo, RailError> {
        let origin_candidates = station_candidates(&origin.name, &origin.city);
        let dest_candidates = station_candidates(&destination.name, &destination.city);

        // One batched lookup covers all candidates for both endpoints.
        let mut all: Vec<String> = origin_candidates.clone();
        all.extend(dest_candidates.iter().cloned());
        let codes = self.provider.station_codes(&all).await?;

        let from = self.resolve_station(origin, &origin_candidates, &codes).await?;
        let to = self
            .resolve_station(destination, &dest_candidates, &codes)
            .await?;

        debug!(
            from = %from.name, to = %to.name, %date,
            "querying train schedule"
        );

        let tickets = self.provider.query_tickets(date, &from.code, &to.code).await?;

        let best = tickets
            .iter()
            .filter_map(|t| t.duration_minutes().map(|d| (t, d)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .ok_or_else(|| RailError::NoTrains {
                from: from.name.clone(),
                to: to.name.clone(),
            })?;

        let (ticket, duration_minutes) = best;
        Ok(TrainInfo {
            train_code: ticket.train_code.clone(),
            from_station: if ticket.from_station.is_empty() {
                from.name.clone()
            } else {
                ticket.from_station.clone()
            },
            to_station: if ticket.to_station.is_empty() {
                to.name.clone()
            } else {
                ticket.to_station.clone()
            },
            depart: ticket.start_time.clone(),
            arrive: ticket.arrive_time.clone(),
            duration_minutes,
            price: ticket.first_price(),
            // The ticket provider has no route distance; approximate with
            // the great-circle distance between the resolved points.
            distance_km: haversine_km(origin, destination),
        })
    }

    /// Pick the first candidate that resolved to a code, or fall back to
    /// substring matching against the station list of the point's city.
    async fn resolve_station(
        &self,
        point: &Point,
        candidates: &[String],
        codes: &HashMap<String, StationDto>,
    ) -> Result<StationRef, RailError> {
        for candidate in candidates {
            if let Some(station) = codes.get(candidate) {
                return Ok(StationRef {
                    code: station.station_code.clone(),
                    name: station.station_name.clone(),
                });
            }
        }

        if point.city.is_empty() {
            return Err(RailError::StationNotFound(point.name.clone()));
        }

        warn!(
            name = %point.name, city = %point.city,
            "no direct station match, scanning city station list"
        );

        let stations = self.provider.stations_in_city(&point.city).await?;
        let bare = candidates.first().map(String::as_str).unwrap_or(&point.name);

        stations
            .iter()
            .find(|s| {
                !s.station_name.is_empty()
                    && (s.station_name.contains(bare) || bare.contains(s.station_name.as_str()))
            })
            .map(|s| StationRef {
                code: s.station_code.clone(),
                name: s.station_name.clone(),
            })
            .ok_or_else(|| RailError::StationNotFound(point.name.clone()))
    }
}
