//! # Synthetic Data
//!
//! Mock campus energy data standing in for real metering.
//!
//! ```rust
//! use campus_energy_insights::simulation::CampusDataGenerator;
//! use campus_energy_insights::config::GeneratorConfig;
//!
//! let mut generator = CampusDataGenerator::new(&GeneratorConfig { random_seed: Some(7) });
//! let series = generator.generate();
//! assert_eq!(series.len(), 24);
//! ```

pub mod campus;

pub use campus::{generate, generate_with, CampusDataGenerator};
