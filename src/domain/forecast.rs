use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::HOURS_PER_DAY;

/// Next-day generation forecast for one hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct ForecastRecord {
    #[serde(deserialize_with = "whole_hour")]
    #[validate(range(max = 23))]
    pub hour: u8,
    #[serde(rename = "solarForecast")]
    #[validate(range(min = 0.0))]
    pub solar_forecast_kw: f64,
    #[serde(rename = "windForecast")]
    #[validate(range(min = 0.0))]
    pub wind_forecast_kw: f64,
}

/// Hours arrive as JSON numbers, so `3` and `3.0` are both accepted.
fn whole_hour<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let hour = f64::deserialize(deserializer)?;
    if hour.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&hour) {
        Ok(hour as u8)
    } else {
        Err(D::Error::custom(format!("hour must be a whole number, got {hour}")))
    }
}

/// Check a parsed forecast and return it ordered by hour.
///
/// Accepts only exactly one record per hour 0..23 with non-negative output.
pub fn validate_forecast(mut records: Vec<ForecastRecord>) -> Result<Vec<ForecastRecord>, String> {
    if records.len() != HOURS_PER_DAY {
        return Err(format!(
            "forecast must contain {} hourly records, got {}",
            HOURS_PER_DAY,
            records.len()
        ));
    }

    for r in &records {
        r.validate()
            .map_err(|e| format!("forecast hour {}: {}", r.hour, e))?;
        if !r.solar_forecast_kw.is_finite() || !r.wind_forecast_kw.is_finite() {
            return Err(format!("forecast hour {} contains a non-finite number", r.hour));
        }
    }

    records.sort_by_key(|r| r.hour);
    for (expected, r) in records.iter().enumerate() {
        if r.hour as usize != expected {
            return Err(format!("forecast hour {expected} is missing or duplicated"));
        }
    }

    Ok(records)
}
