//! Energy-balance model for day-to-day bodyweight change.
//!
//! Expenditure is a weight-proportional basal rate plus exercise, steps and the
//! thermic effect of food. The net energy over the elapsed days is converted to
//! mass at a fixed energy density.

use serde::Serialize;

use crate::domain::Drivers;

/// Physiological constants of the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelParams {
    /// Energy density of body mass (kcal per kg).
    pub calories_per_kg: f64,
    /// Basal rate (kcal per kg of bodyweight per day).
    pub bmr_multiplier: f64,
    /// Exercise expenditure (kcal per minute).
    pub exercise_calories_per_min: f64,
    /// Walking expenditure (kcal per 1000 steps).
    pub steps_calories_per_1000: f64,
    /// Fraction of protein energy spent digesting it.
    pub protein_tef: f64,
    /// Fraction of carbohydrate energy spent digesting it.
    pub carbs_tef: f64,
    /// Fraction of fat energy spent digesting it.
    pub fat_tef: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            calories_per_kg: 7700.0,
            bmr_multiplier: 24.0,
            exercise_calories_per_min: 8.0,
            steps_calories_per_1000: 40.0,
            protein_tef: 0.25,
            carbs_tef: 0.10,
            fat_tef: 0.03,
        }
    }
}

/// Energy content of macronutrients (kcal per gram).
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

impl ModelParams {
    /// Thermic effect of food for the given macros (kcal).
    pub fn thermic_effect(&self, drivers: &Drivers) -> f64 {
        drivers.protein_g * KCAL_PER_G_PROTEIN * self.protein_tef
            + drivers.carbs_g * KCAL_PER_G_CARBS * self.carbs_tef
            + drivers.fat_g * KCAL_PER_G_FAT * self.fat_tef
    }

    /// Total daily energy expenditure at `weight_kg` (kcal).
    pub fn total_expenditure(&self, weight_kg: f64, drivers: &Drivers) -> f64 {
        let bmr = weight_kg * self.bmr_multiplier;
        let exercise = drivers.exercise_minutes * self.exercise_calories_per_min;
        let steps = (drivers.steps / 1000.0) * self.steps_calories_per_1000;
        bmr + exercise + steps + self.thermic_effect(drivers)
    }

    /// Predicts bodyweight after `days` days at a constant daily energy balance.
    ///
    /// The net balance is evaluated once at `current_weight` and scaled by `days`,
    /// so multi-day steps are a linear extrapolation rather than a re-simulation.
    pub fn predict_next_weight(&self, current_weight: f64, drivers: &Drivers, days: f64) -> f64 {
        let net_calories = drivers.calories - self.total_expenditure(current_weight, drivers);
        let weight_change = net_calories * days / self.calories_per_kg;
        current_weight + weight_change
    }
}
