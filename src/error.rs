//! Error types for weightcast.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when loading daily records from a spreadsheet.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("cannot read file: {0}")]
    CannotRead(String),

    #[error("invalid Excel format: {0}")]
    InvalidFormat(String),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("invalid date format in row {row}: {value}")]
    InvalidDate { row: usize, value: String },

    #[error("invalid {column} value in row {row}: {value}")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Reason why a forecast couldn't be produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "error", content = "details")]
pub enum ForecastError {
    /// Not enough weight observations to run the model at all.
    #[serde(rename = "insufficient_data")]
    InsufficientData { available: usize, required: usize },

    /// The normalized series carries no weight observation to anchor on.
    #[serde(rename = "no_weight_observations")]
    NoWeightObservations,

    /// A zero-day horizon has no projected value.
    #[serde(rename = "empty_horizon")]
    EmptyHorizon,

    /// Horizon longer than the engine will project.
    #[serde(rename = "horizon_out_of_range")]
    HorizonOutOfRange { requested: u32, max: u32 },

    /// More historical anchors than the engine will re-run.
    #[serde(rename = "too_many_anchors")]
    TooManyAnchors { requested: u32, max: u32 },

    /// Forecast dates fall outside the representable calendar.
    #[serde(rename = "date_out_of_range")]
    DateOutOfRange,
}

impl std::fmt::Display for ForecastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastError::InsufficientData {
                available,
                required,
            } => {
                write!(
                    f,
                    "Need {} weight observations, found {}",
                    required, available
                )
            }
            ForecastError::NoWeightObservations => {
                write!(f, "No weight observation to forecast from")
            }
            ForecastError::EmptyHorizon => write!(f, "Forecast horizon must be at least 1 day"),
            ForecastError::HorizonOutOfRange { requested, max } => {
                write!(f, "Forecast horizon of {} days exceeds {} days", requested, max)
            }
            ForecastError::TooManyAnchors { requested, max } => {
                write!(
                    f,
                    "{} historical anchors requested, at most {} allowed",
                    requested, max
                )
            }
            ForecastError::DateOutOfRange => write!(f, "Forecast dates out of calendar range"),
        }
    }
}

impl std::error::Error for ForecastError {}

/// Reason why backtest statistics are unavailable.
///
/// Never fatal: the forecast still runs, just without uncertainty bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "error", content = "details")]
pub enum BacktestError {
    /// Too few weight observations for the error statistics to mean anything.
    #[serde(rename = "too_few_observations")]
    TooFewObservations { available: usize, required: usize },

    /// No historical day had both a weight and an anchor in its lookback window.
    #[serde(rename = "no_evaluable_points")]
    NoEvaluablePoints,
}

impl std::fmt::Display for BacktestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BacktestError::TooFewObservations {
                available,
                required,
            } => {
                write!(
                    f,
                    "Need {} weight observations for backtest, found {}",
                    required, available
                )
            }
            BacktestError::NoEvaluablePoints => write!(f, "No evaluable backtest points"),
        }
    }
}

impl std::error::Error for BacktestError {}
