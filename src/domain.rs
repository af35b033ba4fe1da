//! Domain types for daily health records and forecast output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Daily metrics a record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Weight,
    Calories,
    Protein,
    Carbs,
    Fat,
    Exercise,
    Steps,
}

impl Metric {
    /// Returns all metric variants.
    pub fn all() -> &'static [Metric] {
        &[
            Metric::Weight,
            Metric::Calories,
            Metric::Protein,
            Metric::Carbs,
            Metric::Fat,
            Metric::Exercise,
            Metric::Steps,
        ]
    }

    /// Returns the display name for the metric.
    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::Weight => "Weight",
            Metric::Calories => "Calories",
            Metric::Protein => "Protein",
            Metric::Carbs => "Carbs",
            Metric::Fat => "Fat",
            Metric::Exercise => "Exercise",
            Metric::Steps => "Steps",
        }
    }

    /// Returns the value of this metric on a record, if logged.
    pub fn value_of(&self, record: &DailyRecord) -> Option<f64> {
        match self {
            Metric::Weight => record.weight_kg,
            Metric::Calories => record.calories,
            Metric::Protein => record.protein_g,
            Metric::Carbs => record.carbs_g,
            Metric::Fat => record.fat_g,
            Metric::Exercise => record.exercise_minutes,
            Metric::Steps => record.steps,
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight" | "weight_kg" | "bodyweight" => Ok(Metric::Weight),
            "calories" | "calorie" | "kcal" => Ok(Metric::Calories),
            "protein" | "protein_g" => Ok(Metric::Protein),
            "carbs" | "carbs_g" | "carbohydrates" => Ok(Metric::Carbs),
            "fat" | "fat_g" => Ok(Metric::Fat),
            "exercise" | "exercise_minutes" => Ok(Metric::Exercise),
            "steps" => Ok(Metric::Steps),
            _ => Err(format!("unknown metric: {}", s)),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One logged day. Absent fields were not logged that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub exercise_minutes: Option<f64>,
    pub steps: Option<f64>,
}

impl DailyRecord {
    /// Creates a record with nothing logged.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            weight_kg: None,
            calories: None,
            protein_g: None,
            carbs_g: None,
            fat_g: None,
            exercise_minutes: None,
            steps: None,
        }
    }

    /// Sets the logged bodyweight.
    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// Sets the logged calorie intake.
    pub fn with_calories(mut self, calories: f64) -> Self {
        self.calories = Some(calories);
        self
    }

    /// Sets the logged macronutrients in grams.
    pub fn with_macros(mut self, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        self.protein_g = Some(protein_g);
        self.carbs_g = Some(carbs_g);
        self.fat_g = Some(fat_g);
        self
    }

    /// Sets logged exercise minutes and step count.
    pub fn with_activity(mut self, exercise_minutes: f64, steps: f64) -> Self {
        self.exercise_minutes = Some(exercise_minutes);
        self.steps = Some(steps);
        self
    }

    /// Returns the weight if it counts as an observation.
    ///
    /// Zero, negative and non-finite weights are treated as not logged.
    pub fn observed_weight(&self) -> Option<f64> {
        self.weight_kg.filter(|w| w.is_finite() && *w > 0.0)
    }

    /// Returns the drivers of this record with absent fields as 0.
    pub fn drivers_or_zero(&self) -> Drivers {
        Drivers {
            calories: self.calories.unwrap_or(0.0),
            protein_g: self.protein_g.unwrap_or(0.0),
            carbs_g: self.carbs_g.unwrap_or(0.0),
            fat_g: self.fat_g.unwrap_or(0.0),
            exercise_minutes: self.exercise_minutes.unwrap_or(0.0),
            steps: self.steps.unwrap_or(0.0),
        }
    }

    /// Returns the drivers of this record, filling absent fields from `defaults`.
    ///
    /// An explicitly logged zero is kept.
    pub fn drivers_or(&self, defaults: &Drivers) -> Drivers {
        Drivers {
            calories: self.calories.unwrap_or(defaults.calories),
            protein_g: self.protein_g.unwrap_or(defaults.protein_g),
            carbs_g: self.carbs_g.unwrap_or(defaults.carbs_g),
            fat_g: self.fat_g.unwrap_or(defaults.fat_g),
            exercise_minutes: self.exercise_minutes.unwrap_or(defaults.exercise_minutes),
            steps: self.steps.unwrap_or(defaults.steps),
        }
    }
}

/// Daily inputs to the energy-balance model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Drivers {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub exercise_minutes: f64,
    pub steps: f64,
}

impl Drivers {
    /// Arithmetic mean of each field. Returns zeros for an empty slice.
    pub fn mean(drivers: &[Drivers]) -> Drivers {
        if drivers.is_empty() {
            return Drivers::default();
        }

        let n = drivers.len() as f64;
        let sum = drivers.iter().fold(Drivers::default(), |acc, d| Drivers {
            calories: acc.calories + d.calories,
            protein_g: acc.protein_g + d.protein_g,
            carbs_g: acc.carbs_g + d.carbs_g,
            fat_g: acc.fat_g + d.fat_g,
            exercise_minutes: acc.exercise_minutes + d.exercise_minutes,
            steps: acc.steps + d.steps,
        });

        Drivers {
            calories: sum.calories / n,
            protein_g: sum.protein_g / n,
            carbs_g: sum.carbs_g / n,
            fat_g: sum.fat_g / n,
            exercise_minutes: sum.exercise_minutes / n,
            steps: sum.steps / n,
        }
    }
}

/// One day of the gap-filled timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPoint {
    pub date: NaiveDate,
    /// Observed weight, `None` on days without an observation.
    pub weight: Option<f64>,
    /// Drivers copied from that day's record, `None` when no record exists.
    pub drivers: Option<Drivers>,
}

impl NormalizedPoint {
    /// Drivers with gap days contributing zero.
    pub fn drivers_or_zero(&self) -> Drivers {
        self.drivers.unwrap_or_default()
    }
}

/// A projected weight for one future day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

impl ForecastPoint {
    /// Width of the confidence band, if bounds are present.
    pub fn band_width(&self) -> Option<f64> {
        self.lower.zip(self.upper).map(|(l, u)| u - l)
    }
}
