//! Bodyweight trajectory forecasting.
//!
//! Daily records (weight, nutrition, exercise, steps) are aligned into a daily
//! timeline, an energy-balance model is backtested against the observed
//! weights, and the model is run forward under several driver scenarios with
//! an uncertainty band derived from the backtest error.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use weightcast::{DailyRecord, ForecastConfig, ModelParams, run_forecast};
//!
//! let records: Vec<DailyRecord> = Vec::new();
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! match run_forecast(&records, today, &ModelParams::default(), &ForecastConfig::default()) {
//!     Ok(report) => println!("{:+.1} kg", report.forecast.summary.change),
//!     Err(e) => println!("{}", e),
//! }
//! ```

pub mod backtest;
pub mod domain;
pub mod error;
pub mod excel;
pub mod forecast;
pub mod model;
pub mod normalize;
pub mod pipeline;

pub use backtest::{BacktestPrediction, BacktestResult, backtest};
pub use domain::{DailyRecord, Drivers, ForecastPoint, Metric, NormalizedPoint};
pub use error::{BacktestError, ForecastError, ParseError};
pub use forecast::{Forecast, ForecastConfig, ForecastSummary, Scenario, ScenarioForecast, forecast};
pub use model::ModelParams;
pub use normalize::{RecordBook, normalize};
pub use pipeline::{ForecastReport, run_forecast};
