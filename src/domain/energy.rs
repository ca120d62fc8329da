use serde::{Deserialize, Serialize};

/// Number of hourly records in one series.
pub const HOURS_PER_DAY: usize = 24;

/// First and last hour (inclusive) counted as daylight.
pub const DAYLIGHT_START_HOUR: u8 = 6;
pub const DAYLIGHT_END_HOUR: u8 = 18;

pub fn is_daylight(hour: u8) -> bool {
    (DAYLIGHT_START_HOUR..=DAYLIGHT_END_HOUR).contains(&hour)
}

/// One hour of campus generation and demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub hour: u8,
    #[serde(rename = "solarOutputKW")]
    pub solar_output_kw: f64,
    #[serde(rename = "windOutputKW")]
    pub wind_output_kw: f64,
    #[serde(rename = "demandKW")]
    pub demand_kw: f64,
    #[serde(rename = "sunlightFlag")]
    pub sunlight_flag: bool,
    #[serde(rename = "windSpeed")]
    pub wind_speed: f64,
}

impl HourlyRecord {
    /// Solar plus wind output for the hour
    pub fn renewables_kw(&self) -> f64 {
        self.solar_output_kw + self.wind_output_kw
    }
}

/// Sums across a series, embedded in the analysis prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeriesTotals {
    pub total_solar_kw: f64,
    pub total_wind_kw: f64,
    pub total_demand_kw: f64,
}

impl SeriesTotals {
    pub fn of(series: &[HourlyRecord]) -> Self {
        series.iter().fold(Self::default(), |acc, r| Self {
            total_solar_kw: acc.total_solar_kw + r.solar_output_kw,
            total_wind_kw: acc.total_wind_kw + r.wind_output_kw,
            total_demand_kw: acc.total_demand_kw + r.demand_kw,
        })
    }

    pub fn total_renewables_kw(&self) -> f64 {
        self.total_solar_kw + self.total_wind_kw
    }
}

/// Supply-versus-demand chart point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplyPoint {
    /// Axis label, e.g. `"13:00"`
    pub hour: String,
    pub renewables: f64,
    pub demand: f64,
    pub solar: f64,
    pub wind: f64,
}

impl From<&HourlyRecord> for SupplyPoint {
    fn from(r: &HourlyRecord) -> Self {
        Self {
            hour: format!("{}:00", r.hour),
            renewables: r.renewables_kw(),
            demand: r.demand_kw,
            solar: r.solar_output_kw,
            wind: r.wind_output_kw,
        }
    }
}

pub fn supply_curve(series: &[HourlyRecord]) -> Vec<SupplyPoint> {
    series.iter().map(SupplyPoint::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hour: u8, solar: f64, wind: f64, demand: f64) -> HourlyRecord {
        HourlyRecord {
            hour,
            solar_output_kw: solar,
            wind_output_kw: wind,
            demand_kw: demand,
            sunlight_flag: is_daylight(hour),
            wind_speed: 10.0,
        }
    }

    #[test]
    fn test_daylight_window_is_inclusive() {
        assert!(!is_daylight(5));
        assert!(is_daylight(6));
        assert!(is_daylight(12));
        assert!(is_daylight(18));
        assert!(!is_daylight(19));
        assert!(!is_daylight(0));
    }

    #[test]
    fn test_totals() {
        let series = vec![
            record(0, 0.0, 150.0, 400.0),
            record(12, 520.0, 210.0, 900.0),
        ];
        let totals = SeriesTotals::of(&series);

        assert_eq!(totals.total_solar_kw, 520.0);
        assert_eq!(totals.total_wind_kw, 360.0);
        assert_eq!(totals.total_demand_kw, 1300.0);
        assert_eq!(totals.total_renewables_kw(), 880.0);
    }

    #[test]
    fn test_totals_of_empty_series() {
        assert_eq!(SeriesTotals::of(&[]), SeriesTotals::default());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(record(7, 100.0, 200.0, 300.0)).unwrap();

        assert_eq!(json["hour"], 7);
        assert_eq!(json["solarOutputKW"], 100.0);
        assert_eq!(json["windOutputKW"], 200.0);
        assert_eq!(json["demandKW"], 300.0);
        assert_eq!(json["sunlightFlag"], true);
        assert_eq!(json["windSpeed"], 10.0);
    }

    #[test]
    fn test_supply_curve() {
        let curve = supply_curve(&[record(13, 300.0, 120.0, 850.0)]);

        assert_eq!(curve.len(), 1);
        assert_eq!(curve[0].hour, "13:00");
        assert_eq!(curve[0].renewables, 420.0);
        assert_eq!(curve[0].demand, 850.0);
        assert_eq!(curve[0].solar, 300.0);
        assert_eq!(curve[0].wind, 120.0);
    }
}
