use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sustainability analysis returned by the generative model.
///
/// Serialized with the model's wire names so the same struct parses the
/// response and feeds the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Overall score, 0-100
    #[validate(range(min = 0.0, max = 100.0))]
    pub sustainability_score: f64,

    /// Estimated renewable energy wasted (kW)
    #[serde(rename = "wastageDetected")]
    #[validate(range(min = 0.0))]
    pub wastage_detected_kw: f64,

    /// Estimated grid dependency reduction (%)
    #[validate(range(min = 0.0, max = 100.0))]
    pub grid_reduction_percent: f64,

    /// Suggested time ranges for shifting demand, e.g. "1:00 PM - 3:00 PM"
    #[validate(length(min = 1))]
    pub load_shift_windows: Vec<String>,

    /// Plain-language actions for decision-makers
    #[validate(length(min = 1))]
    pub recommendations: Vec<String>,

    /// ESG and policy framing
    #[validate(length(min = 1))]
    pub esg_insights: Vec<String>,

    #[validate(length(min = 1))]
    pub summary: String,
}

impl AnalysisResult {
    /// Check ranges and presence of every field.
    ///
    /// The model is asked to honour these bounds but nothing forces it to,
    /// so a parsed result is only accepted after this passes.
    pub fn validate_contract(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())?;

        if !self.sustainability_score.is_finite()
            || !self.wastage_detected_kw.is_finite()
            || !self.grid_reduction_percent.is_finite()
        {
            return Err("analysis contains a non-finite number".to_string());
        }

        let lists = [
            ("loadShiftWindows", &self.load_shift_windows),
            ("recommendations", &self.recommendations),
            ("esgInsights", &self.esg_insights),
        ];
        for (name, items) in lists {
            if items.iter().any(|s| s.trim().is_empty()) {
                return Err(format!("{name} contains a blank entry"));
            }
        }

        if self.summary.trim().is_empty() {
            return Err("summary is blank".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            sustainability_score: 72.0,
            wastage_detected_kw: 140.0,
            grid_reduction_percent: 28.5,
            load_shift_windows: vec!["11:00 AM - 1:00 PM".into(), "2:00 PM - 4:00 PM".into()],
            recommendations: vec![
                "Run laundry loads at midday".into(),
                "Pre-cool buildings before 2 PM".into(),
                "Charge fleet vehicles overnight on wind".into(),
            ],
            esg_insights: vec!["Aligns with SDG 7.2".into(), "Supports CDP reporting".into()],
            summary: "Solar surplus at midday is under-used.".into(),
        }
    }

    #[test]
    fn test_valid_result_passes() {
        assert!(sample().validate_contract().is_ok());
    }

    #[test]
    fn test_score_out_of_range() {
        let mut r = sample();
        r.sustainability_score = 140.0;
        assert!(r.validate_contract().is_err());

        let mut r = sample();
        r.grid_reduction_percent = -1.0;
        assert!(r.validate_contract().is_err());
    }

    #[test]
    fn test_negative_wastage_rejected() {
        let mut r = sample();
        r.wastage_detected_kw = -5.0;
        assert!(r.validate_contract().is_err());
    }

    #[test]
    fn test_empty_and_blank_lists_rejected() {
        let mut r = sample();
        r.recommendations.clear();
        assert!(r.validate_contract().is_err());

        let mut r = sample();
        r.esg_insights.push("   ".into());
        let err = r.validate_contract().unwrap_err();
        assert!(err.contains("esgInsights"));
    }

    #[test]
    fn test_blank_summary_rejected() {
        let mut r = sample();
        r.summary = " ".into();
        assert!(r.validate_contract().is_err());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        for key in [
            "sustainabilityScore",
            "wastageDetected",
            "gridReductionPercent",
            "loadShiftWindows",
            "recommendations",
            "esgInsights",
            "summary",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_missing_field_fails_to_parse() {
        let json = r#"{
            "sustainabilityScore": 50,
            "wastageDetected": 10,
            "gridReductionPercent": 20,
            "loadShiftWindows": ["a"],
            "recommendations": ["b"],
            "esgInsights": ["c"]
        }"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }
}
