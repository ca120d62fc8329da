pub mod api;
pub mod config;
pub mod controller;
pub mod domain;
pub mod genai;
pub mod insights;
pub mod simulation;
pub mod telemetry;
