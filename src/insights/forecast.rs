use tracing::{debug, info};

use super::{InsightError, InsightService};
use crate::domain::{validate_forecast, ForecastRecord, HourlyRecord};
use crate::genai::{GenerationRequest, Schema};

/// Prompt asking for a next-day hourly solar and wind forecast.
pub fn forecast_prompt(series: &[HourlyRecord]) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string(series)?;
    Ok(format!(
        "Based on today's sunlight and wind speeds, forecast next-day hourly solar and wind \
         generation. Data: {data}. Return an array of 24 objects with hour, solarForecast, \
         windForecast."
    ))
}

pub fn forecast_schema() -> Schema {
    Schema::array(Schema::object([
        ("hour", Schema::number()),
        ("solarForecast", Schema::number()),
        ("windForecast", Schema::number()),
    ]))
}

/// Parse the model's forecast text into 24 records ordered by hour.
pub fn parse_forecast(text: &str) -> Result<Vec<ForecastRecord>, InsightError> {
    let records: Vec<ForecastRecord> =
        serde_json::from_str(text.trim()).map_err(InsightError::Parse)?;
    validate_forecast(records).map_err(InsightError::Invalid)
}

impl InsightService {
    /// Ask the model for tomorrow's hourly generation given today's `series`.
    pub async fn forecast(
        &self,
        series: &[HourlyRecord],
    ) -> Result<Vec<ForecastRecord>, InsightError> {
        let prompt = forecast_prompt(series).map_err(InsightError::Encode)?;
        debug!(records = series.len(), "requesting next-day forecast");

        let text = self
            .generate(GenerationRequest {
                prompt,
                response_schema: forecast_schema(),
            })
            .await?;

        let records = parse_forecast(&text)?;
        let solar: f64 = records.iter().map(|r| r.solar_forecast_kw).sum();
        let wind: f64 = records.iter().map(|r| r.wind_forecast_kw).sum();
        info!(
            solar_forecast_kw = solar,
            wind_forecast_kw = wind,
            "next-day forecast received"
        );
        Ok(records)
    }
}
