//! Wire DTOs for the rail ticket bridge.

use serde::{Deserialize, Deserializer};

/// Accept a number, a numeric string, or nothing.
fn de_flexible_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().trim_start_matches('¥').parse().ok(),
        _ => None,
    })
}

/// One rail-network station.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StationDto {
    #[serde(default)]
    pub station_code: String,
    #[serde(default)]
    pub station_name: String,
}

/// One seat class with its fare.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceDto {
    #[serde(default)]
    pub seat_name: String,
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub price: Option<f64>,
}

/// One train option from a ticket query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketDto {
    #[serde(default)]
    pub train_code: String,
    #[serde(default)]
    pub from_station: String,
    #[serde(default)]
    pub to_station: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub arrive_time: String,
    /// Journey duration as "HH:MM".
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub prices: Vec<PriceDto>,
}

impl TicketDto {
    /// Parse the "HH:MM" duration into minutes.
    pub fn duration_minutes(&self) -> Option<f64> {
        let (hours, minutes) = self.duration.split_once(':')?;
        let hours: f64 = hours.trim().parse().ok()?;
        let minutes: f64 = minutes.trim().parse().ok()?;
        Some(hours * 60.0 + minutes)
    }

    /// Fare of the first seat class with a non-zero price.
    pub fn first_price(&self) -> Option<f64> {
        self.prices
            .iter()
            .filter_map(|p| p.price)
            .find(|&p| p > 0.0)
    }
}
