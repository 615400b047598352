pub mod config;
pub mod errors;
pub mod models;
pub mod numerics;
pub mod predictor;
pub mod report;
pub mod simulation;
