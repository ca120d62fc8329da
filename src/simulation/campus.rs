//! # Campus Energy Data Generator
//!
//! Produces a mock 24-hour series of campus solar, wind and demand figures.
//! Solar and demand follow a midday sine bump with uniform noise on top; wind
//! is noise within a fixed band.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;

use crate::config::GeneratorConfig;
use crate::domain::{is_daylight, HourlyRecord, HOURS_PER_DAY};

/// Uniform noise span added to daylight solar output (kW)
const SOLAR_NOISE_KW: f64 = 500.0;
/// Amplitude of the daylight solar sine (kW)
const SOLAR_AMPLITUDE_KW: f64 = 200.0;
const WIND_NOISE_KW: f64 = 300.0;
const WIND_BASE_KW: f64 = 100.0;
const DEMAND_NOISE_KW: f64 = 400.0;
const DEMAND_BASE_KW: f64 = 400.0;
const DEMAND_AMPLITUDE_KW: f64 = 200.0;
const WIND_SPEED_NOISE: f64 = 20.0;
const WIND_SPEED_BASE: f64 = 5.0;

/// Generates synthetic campus series from its own RNG.
pub struct CampusDataGenerator {
    rng: StdRng,
}

impl CampusDataGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// A fresh 24-record series ordered by hour.
    pub fn generate(&mut self) -> Vec<HourlyRecord> {
        generate_with(&mut self.rng)
    }
}

impl Default for CampusDataGenerator {
    fn default() -> Self {
        Self::new(&GeneratorConfig::default())
    }
}

/// A fresh series drawn from the thread-local RNG.
pub fn generate() -> Vec<HourlyRecord> {
    generate_with(&mut rand::thread_rng())
}

pub fn generate_with<R: Rng>(rng: &mut R) -> Vec<HourlyRecord> {
    (0..HOURS_PER_DAY as u8).map(|hour| hourly_record(rng, hour)).collect()
}

fn hourly_record<R: Rng>(rng: &mut R, hour: u8) -> HourlyRecord {
    let h = hour as f64;
    let daylight = is_daylight(hour);

    // sin((h - 6)π/12) stays non-negative over 6..=18; the clamp pins the invariant.
    let solar_output_kw = if daylight {
        (rng.gen_range(0.0..SOLAR_NOISE_KW) + SOLAR_AMPLITUDE_KW * ((h - 6.0) * PI / 12.0).sin())
            .floor()
            .max(0.0)
    } else {
        0.0
    };
    let wind_output_kw = (rng.gen_range(0.0..WIND_NOISE_KW) + WIND_BASE_KW).floor();
    let demand_kw = (rng.gen_range(0.0..DEMAND_NOISE_KW)
        + DEMAND_BASE_KW
        + DEMAND_AMPLITUDE_KW * ((h - 12.0) * PI / 12.0).sin())
    .floor();
    let wind_speed = (rng.gen_range(0.0..WIND_SPEED_NOISE) + WIND_SPEED_BASE).floor();

    HourlyRecord {
        hour,
        solar_output_kw,
        wind_output_kw,
        demand_kw,
        sunlight_flag: daylight,
        wind_speed,
    }
}
