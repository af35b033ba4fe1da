//! Historical replay of the energy-balance model against observed weights.
//!
//! Every observed day with a full lookback window is predicted from the most
//! recent weight inside that window, using the window's mean drivers, and the
//! absolute errors are summarized. The spread of these errors is what the
//! forecaster widens into its confidence band.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Drivers, NormalizedPoint};
use crate::error::BacktestError;
use crate::model::ModelParams;

/// Days of context preceding each evaluated day.
pub const BACKTEST_WINDOW_DAYS: usize = 7;

/// Minimum weight observations before backtest statistics are reported.
pub const MIN_BACKTEST_OBSERVATIONS: usize = 10;

/// One replayed day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestPrediction {
    pub date: NaiveDate,
    pub actual: f64,
    pub predicted: f64,
}

impl BacktestPrediction {
    pub fn abs_error(&self) -> f64 {
        (self.predicted - self.actual).abs()
    }
}

/// Backtest outcome with error statistics over all replayed days.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestResult {
    pub predictions: Vec<BacktestPrediction>,
    /// Mean absolute error (kg).
    pub mae: f64,
    /// Root mean squared error (kg).
    pub rmse: f64,
    /// Population standard deviation of the absolute errors (kg).
    pub std: f64,
}

impl BacktestResult {
    /// Number of replayed days.
    pub fn samples(&self) -> usize {
        self.predictions.len()
    }

    /// Builds the result from replayed days. Returns `None` when empty.
    fn from_predictions(predictions: Vec<BacktestPrediction>) -> Option<Self> {
        if predictions.is_empty() {
            return None;
        }

        let n = predictions.len() as f64;
        let errors: Vec<f64> = predictions.iter().map(|p| p.abs_error()).collect();

        let mae = errors.iter().sum::<f64>() / n;
        let rmse = (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt();
        let std = (errors.iter().map(|e| (e - mae).powi(2)).sum::<f64>() / n).sqrt();

        Some(Self {
            predictions,
            mae,
            rmse,
            std,
        })
    }
}

/// Replays the model over a normalized series.
///
/// Day `i` is evaluated when it carries a weight and the window `[i-7, i)` holds
/// at least one weight; the most recent one is the anchor. The prediction jumps
/// straight from the anchor to day `i` with the window's mean drivers, gap days
/// contributing zero.
pub fn backtest(
    series: &[NormalizedPoint],
    params: &ModelParams,
) -> Result<BacktestResult, BacktestError> {
    let mut predictions = Vec::new();

    for i in BACKTEST_WINDOW_DAYS..series.len() {
        let point = &series[i];
        let Some(actual) = point.weight else {
            continue;
        };

        let window = &series[i - BACKTEST_WINDOW_DAYS..i];
        let Some((anchor_date, anchor_weight)) = window
            .iter()
            .rev()
            .find_map(|p| p.weight.map(|w| (p.date, w)))
        else {
            log::debug!("Backtest: no anchor in window before {}", point.date);
            continue;
        };

        let window_drivers: Vec<Drivers> = window.iter().map(|p| p.drivers_or_zero()).collect();
        let mean_drivers = Drivers::mean(&window_drivers);

        let days_since_anchor = (point.date - anchor_date).num_days() as f64;
        let predicted = params.predict_next_weight(anchor_weight, &mean_drivers, days_since_anchor);

        predictions.push(BacktestPrediction {
            date: point.date,
            actual,
            predicted,
        });
    }

    let result =
        BacktestResult::from_predictions(predictions).ok_or(BacktestError::NoEvaluablePoints)?;

    log::info!(
        "Backtest: MAE={:.2}kg, RMSE={:.2}kg, std={:.2}kg (n={})",
        result.mae,
        result.rmse,
        result.std,
        result.samples()
    );

    Ok(result)
}

/// Runs the backtest only when the series has enough weight observations.
pub fn backtest_if_available(
    series: &[NormalizedPoint],
    params: &ModelParams,
) -> Result<BacktestResult, BacktestError> {
    let observations = series.iter().filter(|p| p.weight.is_some()).count();
    if observations < MIN_BACKTEST_OBSERVATIONS {
        return Err(BacktestError::TooFewObservations {
            available: observations,
            required: MIN_BACKTEST_OBSERVATIONS,
        });
    }

    backtest(series, params)
}
