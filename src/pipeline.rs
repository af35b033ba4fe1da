//! End-to-end forecasting over a set of daily records.
//!
//! Records are indexed and normalized, the model is backtested when there is
//! enough history, and the forecaster runs with whatever backtest came out.
//! Every invocation recomputes everything from the given records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::backtest::{BacktestResult, backtest_if_available};
use crate::domain::{DailyRecord, Metric, NormalizedPoint};
use crate::error::{BacktestError, ForecastError};
use crate::forecast::{Forecast, ForecastConfig, forecast};
use crate::model::ModelParams;
use crate::normalize::{RecordBook, normalize_book};

/// Minimum weight observations before any forecast is attempted.
pub const MIN_WEIGHT_OBSERVATIONS: usize = 3;

/// Everything a front end needs to render the forecast.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    /// Gap-filled daily history.
    pub series: Vec<NormalizedPoint>,
    /// Backtest statistics, or why they are unavailable.
    pub backtest: Result<BacktestResult, BacktestError>,
    pub forecast: Forecast,
}

impl ForecastReport {
    /// Backtest statistics, if available.
    pub fn backtest(&self) -> Option<&BacktestResult> {
        self.backtest.as_ref().ok()
    }

    /// Diagnostic line such as `Backtest MAE: 0.42 kg (n=31)`.
    pub fn backtest_label(&self) -> Option<String> {
        self.backtest()
            .map(|b| format!("Backtest MAE: {:.2} kg (n={})", b.mae, b.samples()))
    }
}

/// Runs normalization, backtest and forecast over `records`.
///
/// `today` selects the record used by the today scenario.
pub fn run_forecast(
    records: &[DailyRecord],
    today: NaiveDate,
    params: &ModelParams,
    config: &ForecastConfig,
) -> Result<ForecastReport, ForecastError> {
    let book = RecordBook::from_records(records);

    let observations = book.count(Metric::Weight);
    if observations < MIN_WEIGHT_OBSERVATIONS {
        return Err(ForecastError::InsufficientData {
            available: observations,
            required: MIN_WEIGHT_OBSERVATIONS,
        });
    }

    let series = normalize_book(&book);
    log::debug!(
        "Normalized {} records into {} days ({} weigh-ins)",
        book.len(),
        series.len(),
        observations
    );

    let backtest = backtest_if_available(&series, params);
    if let Err(e) = &backtest {
        log::info!("Backtest unavailable: {}", e);
    }

    let forecast = forecast(
        &book,
        &series,
        backtest.as_ref().ok(),
        params,
        config,
        today,
    )?;

    Ok(ForecastReport {
        series,
        backtest,
        forecast,
    })
}
