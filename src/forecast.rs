//! Forward weight projection under several driver scenarios.
//!
//! Each scenario fixes a set of daily drivers and iterates the energy-balance
//! model one day at a time from an anchor weight. Historical-anchor scenarios
//! restart the projection from an interpolated weight a few days back, which
//! shows how much the projection moves as new days are logged.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Serialize, Serializer};

use crate::backtest::BacktestResult;
use crate::domain::{DailyRecord, Drivers, ForecastPoint, NormalizedPoint};
use crate::error::ForecastError;
use crate::model::ModelParams;
use crate::normalize::RecordBook;

// === Constants ===

/// Days averaged by the weekly-average scenario, ending on the last weigh-in.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;

/// Scale applied to the backtest error spread per sqrt(day).
pub const BAND_SCALE: f64 = 0.1;

/// Longest horizon the forecaster will project (ten years).
pub const MAX_HORIZON_DAYS: u32 = 3650;

/// Most historical-anchor scenarios the forecaster will run.
pub const MAX_HISTORICAL_ANCHORS: u32 = 30;

// === Configuration ===

/// A named set of drivers to project with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scenario {
    /// Drivers logged today.
    Today,
    /// Mean drivers over the week ending on the last weigh-in.
    WeeklyAverage,
    /// Projection restarted from N days before the last weigh-in.
    DaysAgo(u32),
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scenario::Today => write!(f, "today"),
            Scenario::WeeklyAverage => write!(f, "weekly-average"),
            Scenario::DaysAgo(1) => write!(f, "1-day-ago"),
            Scenario::DaysAgo(n) => write!(f, "{}-days-ago", n),
        }
    }
}

impl Serialize for Scenario {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Forecast settings.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastConfig {
    /// Days projected past the last weigh-in.
    pub horizon_days: u32,
    /// Number of historical-anchor scenarios (1..=N days ago).
    pub historical_anchors: u32,
    /// Drivers used where nothing was logged.
    pub default_drivers: Drivers,
    /// Scenario the summary reports.
    pub primary: Scenario,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: 90,
            historical_anchors: 3,
            default_drivers: Drivers {
                calories: 2000.0,
                protein_g: 80.0,
                carbs_g: 250.0,
                fat_g: 70.0,
                exercise_minutes: 30.0,
                steps: 8000.0,
            },
            primary: Scenario::WeeklyAverage,
        }
    }
}

// === Output ===

/// Projection for one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioForecast {
    pub scenario: Scenario,
    pub anchor_date: NaiveDate,
    pub anchor_weight: f64,
    pub drivers: Drivers,
    pub points: Vec<ForecastPoint>,
}

/// Headline numbers for the primary scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastSummary {
    pub scenario: Scenario,
    pub current: f64,
    pub projected: f64,
    pub change: f64,
}

/// All scenario projections plus the summary.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub last_date: NaiveDate,
    pub last_weight: f64,
    pub scenarios: BTreeMap<Scenario, ScenarioForecast>,
    pub summary: ForecastSummary,
}

impl Forecast {
    /// Returns the projection for a scenario.
    pub fn get(&self, scenario: Scenario) -> Option<&ScenarioForecast> {
        self.scenarios.get(&scenario)
    }
}

// === Main Forecast Function ===

/// Projects weight forward from the last weigh-in of `series`.
///
/// Produces the today and weekly-average scenarios over `horizon_days`, plus one
/// historical-anchor scenario per configured day, truncated to the same end date.
/// Confidence bounds are attached only when a backtest is given.
///
/// Horizons above [`MAX_HORIZON_DAYS`] and anchor counts above
/// [`MAX_HISTORICAL_ANCHORS`] are rejected.
pub fn forecast(
    book: &RecordBook,
    series: &[NormalizedPoint],
    backtest: Option<&BacktestResult>,
    params: &ModelParams,
    config: &ForecastConfig,
    today: NaiveDate,
) -> Result<Forecast, ForecastError> {
    if config.horizon_days == 0 {
        return Err(ForecastError::EmptyHorizon);
    }
    if config.horizon_days > MAX_HORIZON_DAYS {
        return Err(ForecastError::HorizonOutOfRange {
            requested: config.horizon_days,
            max: MAX_HORIZON_DAYS,
        });
    }
    if config.historical_anchors > MAX_HISTORICAL_ANCHORS {
        return Err(ForecastError::TooManyAnchors {
            requested: config.historical_anchors,
            max: MAX_HISTORICAL_ANCHORS,
        });
    }

    let (last_date, last_weight) = series
        .iter()
        .rev()
        .find_map(|p| p.weight.map(|w| (p.date, w)))
        .ok_or(ForecastError::NoWeightObservations)?;

    let horizon = i64::from(config.horizon_days);
    let end_date = last_date
        .checked_add_signed(Duration::days(horizon))
        .ok_or(ForecastError::DateOutOfRange)?;
    let error_std = backtest.map(|b| b.std);
    let defaults = &config.default_drivers;

    let mut scenarios = BTreeMap::new();

    let today_drivers = day_drivers(book.get(today), defaults);
    scenarios.insert(
        Scenario::Today,
        simulate(
            Scenario::Today,
            last_date,
            last_weight,
            today_drivers,
            end_date,
            params,
            error_std,
        ),
    );

    let weekly_drivers = weekly_average_drivers(book, last_date, defaults);
    scenarios.insert(
        Scenario::WeeklyAverage,
        simulate(
            Scenario::WeeklyAverage,
            last_date,
            last_weight,
            weekly_drivers,
            end_date,
            params,
            error_std,
        ),
    );

    let observations = book.weight_observations();
    for days_ago in 1..=config.historical_anchors {
        let Some(anchor_date) = last_date.checked_sub_signed(Duration::days(i64::from(days_ago)))
        else {
            break;
        };
        let anchor_weight = interpolate_weight(&observations, anchor_date).unwrap_or(last_weight);
        let drivers = day_drivers(book.get(anchor_date), defaults);

        let projection = simulate(
            Scenario::DaysAgo(days_ago),
            anchor_date,
            anchor_weight,
            drivers,
            end_date,
            params,
            error_std,
        );
        if !projection.points.is_empty() {
            scenarios.insert(Scenario::DaysAgo(days_ago), projection);
        }
    }

    let summary_scenario = if scenarios.contains_key(&config.primary) {
        config.primary
    } else {
        log::warn!(
            "Primary scenario {} not produced, summarizing {}",
            config.primary,
            Scenario::WeeklyAverage
        );
        Scenario::WeeklyAverage
    };

    let projected = scenarios
        .get(&summary_scenario)
        .and_then(|s| s.points.last())
        .map(|p| p.weight)
        .unwrap_or(last_weight);

    log::info!(
        "Forecast: {:.1}kg on {} -> {:.1}kg on {} ({})",
        last_weight,
        last_date,
        projected,
        end_date,
        summary_scenario
    );

    Ok(Forecast {
        last_date,
        last_weight,
        scenarios,
        summary: ForecastSummary {
            scenario: summary_scenario,
            current: last_weight,
            projected,
            change: projected - last_weight,
        },
    })
}

// === Helper Functions ===

/// Iterates the model one day at a time from the anchor up to `end_date`.
fn simulate(
    scenario: Scenario,
    anchor_date: NaiveDate,
    anchor_weight: f64,
    drivers: Drivers,
    end_date: NaiveDate,
    params: &ModelParams,
    error_std: Option<f64>,
) -> ScenarioForecast {
    let days = (end_date - anchor_date).num_days();
    let mut weight = anchor_weight;
    let mut points = Vec::with_capacity(days.max(0) as usize);

    for day_offset in 1..=days {
        weight = params.predict_next_weight(weight, &drivers, 1.0);

        let (lower, upper) = match error_std {
            Some(std) => {
                let spread = Z_95 * uncertainty(std, day_offset);
                (Some(weight - spread), Some(weight + spread))
            }
            None => (None, None),
        };

        points.push(ForecastPoint {
            date: anchor_date + Duration::days(day_offset),
            weight,
            lower,
            upper,
        });
    }

    ScenarioForecast {
        scenario,
        anchor_date,
        anchor_weight,
        drivers,
        points,
    }
}

/// One-sigma uncertainty `day_offset` days after the anchor.
///
/// Grows with the square root of elapsed time, as for a random walk.
pub fn uncertainty(error_std: f64, day_offset: i64) -> f64 {
    error_std * (day_offset as f64).sqrt() * BAND_SCALE
}

/// Drivers for a single day, falling back to defaults field by field.
///
/// No record at all means every field comes from `defaults`.
pub fn day_drivers(record: Option<&DailyRecord>, defaults: &Drivers) -> Drivers {
    record.map_or(*defaults, |r| r.drivers_or(defaults))
}

/// Mean drivers over the week ending on `last_date`.
///
/// Absent fields count as zero within a record. A field that no record in the
/// window carries falls back to its default.
pub fn weekly_average_drivers(
    book: &RecordBook,
    last_date: NaiveDate,
    defaults: &Drivers,
) -> Drivers {
    let window_start = last_date
        .checked_sub_signed(Duration::days(WEEKLY_WINDOW_DAYS - 1))
        .unwrap_or(NaiveDate::MIN);
    let records: Vec<&DailyRecord> = book.range(window_start, last_date).collect();

    let field_mean = |field: fn(&DailyRecord) -> Option<f64>, default: f64| -> f64 {
        if !records.iter().any(|r| field(r).is_some()) {
            return default;
        }
        records.iter().map(|r| field(r).unwrap_or(0.0)).sum::<f64>() / records.len() as f64
    };

    Drivers {
        calories: field_mean(|r| r.calories, defaults.calories),
        protein_g: field_mean(|r| r.protein_g, defaults.protein_g),
        carbs_g: field_mean(|r| r.carbs_g, defaults.carbs_g),
        fat_g: field_mean(|r| r.fat_g, defaults.fat_g),
        exercise_minutes: field_mean(|r| r.exercise_minutes, defaults.exercise_minutes),
        steps: field_mean(|r| r.steps, defaults.steps),
    }
}

/// Linearly interpolates weight at `target` between the bracketing observations.
///
/// Outside the observed range the nearest endpoint is returned. `observations`
/// must be sorted by date. Returns `None` when there are no observations.
pub fn interpolate_weight(observations: &[(NaiveDate, f64)], target: NaiveDate) -> Option<f64> {
    let before = observations.iter().rev().find(|(d, _)| *d <= target);
    let after = observations.iter().find(|(d, _)| *d >= target);

    match (before, after) {
        (Some(&(d0, w0)), Some(&(d1, w1))) => {
            if d0 == d1 {
                return Some(w0);
            }
            let ratio = (target - d0).num_days() as f64 / (d1 - d0).num_days() as f64;
            Some(w0 + (w1 - w0) * ratio)
        }
        (Some(&(_, w)), None) | (None, Some(&(_, w))) => Some(w),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtest::backtest;
    use crate::normalize::normalize_book;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn run(
        records: &[DailyRecord],
        backtest_result: Option<&BacktestResult>,
        config: &ForecastConfig,
        today: NaiveDate,
    ) -> Result<Forecast, ForecastError> {
        let book = RecordBook::from_records(records);
        let series = normalize_book(&book);
        forecast(
            &book,
            &series,
            backtest_result,
            &ModelParams::default(),
            config,
            today,
        )
    }

    fn three_weigh_ins() -> Vec<DailyRecord> {
        vec![
            DailyRecord::new(date(2024, 1, 1)).with_weight(81.0),
            DailyRecord::new(date(2024, 1, 5)).with_weight(80.5),
            DailyRecord::new(date(2024, 1, 10))
                .with_weight(80.0)
                .with_calories(2200.0)
                .with_macros(150.0, 200.0, 60.0)
                .with_activity(45.0, 10000.0),
        ]
    }

    // === Interpolation Tests ===

    #[test]
    fn test_interpolate_endpoints_exact() {
        let obs = vec![(date(2024, 1, 1), 80.0), (date(2024, 1, 11), 79.0)];
        assert_eq!(interpolate_weight(&obs, date(2024, 1, 1)), Some(80.0));
        assert_eq!(interpolate_weight(&obs, date(2024, 1, 11)), Some(79.0));
    }

    #[test]
    fn test_interpolate_midpoint() {
        let obs = vec![(date(2024, 1, 1), 80.0), (date(2024, 1, 11), 79.0)];
        let w = interpolate_weight(&obs, date(2024, 1, 6)).unwrap();
        assert!((w - 79.5).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_colinear() {
        // (0, 80), (4, 81), (10, 82.5) lie on w = 80 + 0.25 d
        let outer = vec![(date(2024, 1, 1), 80.0), (date(2024, 1, 11), 82.5)];
        let w = interpolate_weight(&outer, date(2024, 1, 5)).unwrap();
        assert!((w - 81.0).abs() < 1e-12);

        let all = vec![
            (date(2024, 1, 1), 80.0),
            (date(2024, 1, 5), 81.0),
            (date(2024, 1, 11), 82.5),
        ];
        assert_eq!(interpolate_weight(&all, date(2024, 1, 5)), Some(81.0));
    }

    #[test]
    fn test_interpolate_clamps_outside_range() {
        let obs = vec![(date(2024, 1, 5), 80.0), (date(2024, 1, 10), 79.0)];
        assert_eq!(interpolate_weight(&obs, date(2024, 1, 1)), Some(80.0));
        assert_eq!(interpolate_weight(&obs, date(2024, 2, 1)), Some(79.0));
        assert_eq!(interpolate_weight(&[], date(2024, 2, 1)), None);
    }

    // === Driver Policy Tests ===

    #[test]
    fn test_day_drivers_without_record_uses_defaults() {
        let defaults = ForecastConfig::default().default_drivers;
        assert_eq!(day_drivers(None, &defaults), defaults);
    }

    #[test]
    fn test_day_drivers_partial_record() {
        let defaults = ForecastConfig::default().default_drivers;
        let record = DailyRecord::new(date(2024, 1, 1)).with_calories(0.0);
        let drivers = day_drivers(Some(&record), &defaults);
        assert_eq!(drivers.calories, 0.0);
        assert_eq!(drivers.protein_g, 80.0);
        assert_eq!(drivers.steps, 8000.0);
    }

    #[test]
    fn test_weekly_average_window() {
        let defaults = ForecastConfig::default().default_drivers;
        let records = vec![
            // Outside the 7-day window ending Jan 10
            DailyRecord::new(date(2024, 1, 3)).with_calories(9000.0),
            DailyRecord::new(date(2024, 1, 4)).with_calories(3000.0),
            DailyRecord::new(date(2024, 1, 10))
                .with_weight(80.0)
                .with_calories(2000.0)
                .with_activity(60.0, 10000.0),
            // After the last weigh-in
            DailyRecord::new(date(2024, 1, 11)).with_calories(9000.0),
        ];
        let book = RecordBook::from_records(&records);

        let drivers = weekly_average_drivers(&book, date(2024, 1, 10), &defaults);

        assert!((drivers.calories - 2500.0).abs() < 1e-12);
        // Only one of the two records logged exercise; the other counts as zero
        assert!((drivers.exercise_minutes - 30.0).abs() < 1e-12);
        assert!((drivers.steps - 5000.0).abs() < 1e-12);
        // Nobody logged macros in the window
        assert_eq!(drivers.protein_g, 80.0);
        assert_eq!(drivers.carbs_g, 250.0);
        assert_eq!(drivers.fat_g, 70.0);
    }

    #[test]
    fn test_weekly_average_empty_window() {
        let defaults = ForecastConfig::default().default_drivers;
        let book = RecordBook::from_records(&[]);
        assert_eq!(
            weekly_average_drivers(&book, date(2024, 1, 10), &defaults),
            defaults
        );
    }

    // === Forecast Tests ===

    #[test]
    fn test_forecast_horizon_and_dates() {
        let config = ForecastConfig::default();
        let result = run(&three_weigh_ins(), None, &config, date(2024, 1, 10)).unwrap();

        assert_eq!(result.last_date, date(2024, 1, 10));
        assert_eq!(result.last_weight, 80.0);

        for scenario in [Scenario::Today, Scenario::WeeklyAverage] {
            let s = result.get(scenario).unwrap();
            assert_eq!(s.points.len(), 90);
            assert_eq!(s.points[0].date, date(2024, 1, 11));
            assert_eq!(s.points[89].date, date(2024, 1, 10) + Duration::days(90));
        }
    }

    #[test]
    fn test_forecast_day_by_day_iteration() {
        let config = ForecastConfig::default();
        let result = run(&three_weigh_ins(), None, &config, date(2024, 1, 10)).unwrap();

        let s = result.get(Scenario::Today).unwrap();
        let params = ModelParams::default();
        let mut expected = 80.0;
        for point in &s.points {
            expected = params.predict_next_weight(expected, &s.drivers, 1.0);
            assert!((point.weight - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_forecast_today_scenario_uses_todays_record() {
        let config = ForecastConfig::default();

        let logged = run(&three_weigh_ins(), None, &config, date(2024, 1, 10)).unwrap();
        let drivers = logged.get(Scenario::Today).unwrap().drivers;
        assert_eq!(drivers.calories, 2200.0);
        assert_eq!(drivers.exercise_minutes, 45.0);

        let unlogged = run(&three_weigh_ins(), None, &config, date(2024, 3, 1)).unwrap();
        assert_eq!(
            unlogged.get(Scenario::Today).unwrap().drivers,
            config.default_drivers
        );
    }

    #[test]
    fn test_forecast_without_backtest_omits_bounds() {
        let config = ForecastConfig::default();
        let result = run(&three_weigh_ins(), None, &config, date(2024, 1, 10)).unwrap();

        for s in result.scenarios.values() {
            assert!(s.points.iter().all(|p| p.lower.is_none() && p.upper.is_none()));
        }
    }

    #[test]
    fn test_forecast_band_widens_with_time() {
        let start = date(2024, 1, 1);
        let records: Vec<DailyRecord> = (0..30)
            .map(|i| {
                let noise = if i % 3 == 0 { 0.4 } else { -0.2 };
                DailyRecord::new(start + Duration::days(i))
                    .with_weight(80.0 + noise)
                    .with_calories(2100.0)
            })
            .collect();
        let book = RecordBook::from_records(&records);
        let series = normalize_book(&book);
        let bt = backtest(&series, &ModelParams::default()).unwrap();
        assert!(bt.std > 0.0);

        let config = ForecastConfig::default();
        let result = forecast(
            &book,
            &series,
            Some(&bt),
            &ModelParams::default(),
            &config,
            date(2024, 1, 30),
        )
        .unwrap();

        let points = &result.get(Scenario::WeeklyAverage).unwrap().points;
        let widths: Vec<f64> = points.iter().map(|p| p.band_width().unwrap()).collect();
        for pair in widths.windows(2) {
            assert!(pair[1] >= pair[0]);
        }

        // Day 1: 2 * 1.96 * std * sqrt(1) * 0.1
        let expected_first = 2.0 * Z_95 * bt.std * BAND_SCALE;
        assert!((widths[0] - expected_first).abs() < 1e-12);
        let p = &points[0];
        assert!((p.upper.unwrap() - p.weight - (p.weight - p.lower.unwrap())).abs() < 1e-12);
    }

    #[test]
    fn test_uncertainty_growth() {
        assert_eq!(uncertainty(0.5, 0), 0.0);
        assert!((uncertainty(0.5, 4) - 0.1).abs() < 1e-12);
        assert!(uncertainty(0.5, 9) > uncertainty(0.5, 4));
    }

    #[test]
    fn test_forecast_historical_anchors() {
        let config = ForecastConfig::default();
        let result = run(&three_weigh_ins(), None, &config, date(2024, 1, 10)).unwrap();

        let end = date(2024, 1, 10) + Duration::days(90);
        for days_ago in 1..=3u32 {
            let s = result.get(Scenario::DaysAgo(days_ago)).unwrap();
            assert_eq!(
                s.anchor_date,
                date(2024, 1, 10) - Duration::days(i64::from(days_ago))
            );
            assert_eq!(s.points.len(), 90 + days_ago as usize);
            assert_eq!(s.points.last().unwrap().date, end);
            // No records on those days
            assert_eq!(s.drivers, config.default_drivers);
        }

        // Jan 9 lies between 80.5 (Jan 5) and 80.0 (Jan 10)
        let one_day = result.get(Scenario::DaysAgo(1)).unwrap();
        assert!((one_day.anchor_weight - 80.1).abs() < 1e-12);
        assert!(result.get(Scenario::DaysAgo(4)).is_none());
    }

    #[test]
    fn test_forecast_no_historical_anchors() {
        let config = ForecastConfig {
            historical_anchors: 0,
            ..Default::default()
        };
        let result = run(&three_weigh_ins(), None, &config, date(2024, 1, 10)).unwrap();
        assert_eq!(result.scenarios.len(), 2);
    }

    #[test]
    fn test_forecast_summary() {
        let config = ForecastConfig::default();
        let result = run(&three_weigh_ins(), None, &config, date(2024, 1, 10)).unwrap();

        let weekly = result.get(Scenario::WeeklyAverage).unwrap();
        assert_eq!(result.summary.scenario, Scenario::WeeklyAverage);
        assert_eq!(result.summary.current, 80.0);
        assert_eq!(result.summary.projected, weekly.points[89].weight);
        assert!((result.summary.change - (result.summary.projected - 80.0)).abs() < 1e-12);
    }

    #[test]
    fn test_forecast_summary_primary_fallback() {
        let config = ForecastConfig {
            primary: Scenario::DaysAgo(7),
            ..Default::default()
        };
        let result = run(&three_weigh_ins(), None, &config, date(2024, 1, 10)).unwrap();
        assert_eq!(result.summary.scenario, Scenario::WeeklyAverage);
    }

    #[test]
    fn test_forecast_errors() {
        let config = ForecastConfig::default();
        let no_weights = vec![DailyRecord::new(date(2024, 1, 1)).with_calories(2000.0)];
        assert_eq!(
            run(&no_weights, None, &config, date(2024, 1, 1)).unwrap_err(),
            ForecastError::NoWeightObservations
        );

        let zero_horizon = ForecastConfig {
            horizon_days: 0,
            ..Default::default()
        };
        assert_eq!(
            run(&three_weigh_ins(), None, &zero_horizon, date(2024, 1, 10)).unwrap_err(),
            ForecastError::EmptyHorizon
        );
    }

    #[test]
    fn test_forecast_rejects_oversized_config() {
        let huge_horizon = ForecastConfig {
            horizon_days: u32::MAX,
            ..Default::default()
        };
        assert_eq!(
            run(&three_weigh_ins(), None, &huge_horizon, date(2024, 1, 10)).unwrap_err(),
            ForecastError::HorizonOutOfRange {
                requested: u32::MAX,
                max: MAX_HORIZON_DAYS
            }
        );

        let huge_anchors = ForecastConfig {
            historical_anchors: u32::MAX,
            ..Default::default()
        };
        assert_eq!(
            run(&three_weigh_ins(), None, &huge_anchors, date(2024, 1, 10)).unwrap_err(),
            ForecastError::TooManyAnchors {
                requested: u32::MAX,
                max: MAX_HISTORICAL_ANCHORS
            }
        );
    }

    #[test]
    fn test_forecast_at_limits() {
        let config = ForecastConfig {
            horizon_days: MAX_HORIZON_DAYS,
            historical_anchors: MAX_HISTORICAL_ANCHORS,
            ..Default::default()
        };
        let result = run(&three_weigh_ins(), None, &config, date(2024, 1, 10)).unwrap();

        let weekly = result.get(Scenario::WeeklyAverage).unwrap();
        assert_eq!(weekly.points.len(), MAX_HORIZON_DAYS as usize);
        assert_eq!(result.scenarios.len(), 2 + MAX_HISTORICAL_ANCHORS as usize);
    }

    #[test]
    fn test_forecast_end_date_past_calendar() {
        let records = vec![
            DailyRecord::new(NaiveDate::MAX - Duration::days(20)).with_weight(80.0),
            DailyRecord::new(NaiveDate::MAX - Duration::days(10)).with_weight(79.8),
            DailyRecord::new(NaiveDate::MAX - Duration::days(5)).with_weight(79.6),
        ];
        assert_eq!(
            run(&records, None, &ForecastConfig::default(), NaiveDate::MAX).unwrap_err(),
            ForecastError::DateOutOfRange
        );
    }

    #[test]
    fn test_weekly_average_at_calendar_start() {
        let defaults = ForecastConfig::default().default_drivers;
        let records = vec![DailyRecord::new(NaiveDate::MIN).with_calories(1800.0)];
        let book = RecordBook::from_records(&records);

        let drivers = weekly_average_drivers(&book, NaiveDate::MIN, &defaults);
        assert_eq!(drivers.calories, 1800.0);
    }

    #[test]
    fn test_scenario_names() {
        assert_eq!(Scenario::Today.to_string(), "today");
        assert_eq!(Scenario::WeeklyAverage.to_string(), "weekly-average");
        assert_eq!(Scenario::DaysAgo(1).to_string(), "1-day-ago");
        assert_eq!(Scenario::DaysAgo(3).to_string(), "3-days-ago");
        assert_eq!(
            serde_json::to_value(Scenario::DaysAgo(2)).unwrap(),
            serde_json::json!("2-days-ago")
        );
    }
}
