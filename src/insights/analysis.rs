use tracing::{debug, info};

use super::{InsightError, InsightService};
use crate::domain::{AnalysisResult, HourlyRecord, SeriesTotals};
use crate::genai::{GenerationRequest, Schema};

/// Prompt asking for an SDG 7 sustainability analysis of `series`.
pub fn analysis_prompt(series: &[HourlyRecord]) -> Result<String, serde_json::Error> {
    let totals = SeriesTotals::of(series);
    let data = serde_json::to_string(series)?;

    Ok(format!(
        "Analyze the following 24-hour energy data for a college campus.\n\
         Total Solar: {solar}kW\n\
         Total Wind: {wind}kW\n\
         Total Demand: {demand}kW\n\
         \n\
         Data Details (Hourly): {data}\n\
         \n\
         Based on this, provide a sustainability analysis aligned with SDG 7.\n\
         - Sustainability Score (0-100)\n\
         - Renewable energy wastage (kW)\n\
         - Grid dependency reduction (%)\n\
         - 2-3 specific time windows for load shifting (e.g., \"1:00 PM - 3:00 PM\")\n\
         - 3 specific daily AI recommendations for decision-makers (non-technical)\n\
         - 2-3 ESG/Policy insights\n\
         - A short summary\n",
        solar = totals.total_solar_kw,
        wind = totals.total_wind_kw,
        demand = totals.total_demand_kw,
    ))
}

pub fn analysis_schema() -> Schema {
    Schema::object([
        ("sustainabilityScore", Schema::number()),
        ("wastageDetected", Schema::number()),
        ("gridReductionPercent", Schema::number()),
        ("loadShiftWindows", Schema::array(Schema::string())),
        ("recommendations", Schema::array(Schema::string())),
        ("esgInsights", Schema::array(Schema::string())),
        ("summary", Schema::string()),
    ])
}

/// Parse and validate the model's analysis text.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, InsightError> {
    let result: AnalysisResult = serde_json::from_str(text.trim()).map_err(InsightError::Parse)?;
    result.validate_contract().map_err(InsightError::Invalid)?;
    Ok(result)
}

impl InsightService {
    /// Ask the model for a sustainability analysis of `series`.
    ///
    /// Degenerate input (all zeros, or fewer than 24 hours) is sent as-is.
    pub async fn analyze(&self, series: &[HourlyRecord]) -> Result<AnalysisResult, InsightError> {
        let prompt = analysis_prompt(series).map_err(InsightError::Encode)?;
        debug!(records = series.len(), "requesting sustainability analysis");

        let text = self
            .generate(GenerationRequest {
                prompt,
                response_schema: analysis_schema(),
            })
            .await?;

        let result = parse_analysis(&text)?;
        info!(
            sustainability_score = result.sustainability_score,
            wastage_kw = result.wastage_detected_kw,
            grid_reduction_percent = result.grid_reduction_percent,
            "sustainability analysis received"
        );
        Ok(result)
    }
}
