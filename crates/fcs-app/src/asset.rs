//! Right-sizing advice for an existing diesel generator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const UNDERLOADED_PCT: f64 = 30.0;
const HEALTHY_MAX_PCT: f64 = 70.0;
const REPLACE_AGE_YEARS: f64 = 10.0;
/// Efficiency points lost per load-factor point below the healthy band.
const EFFICIENCY_LOSS_PER_PCT: f64 = 0.5;
/// Idle and proportional burn (L/h per kVA), as in the diesel baseline.
const IDLE_BURN: f64 = 0.07;
const LOAD_BURN: f64 = 0.24;
/// Waste markup for wet stacking and extra maintenance on light load.
const LIGHT_LOAD_PENALTY: f64 = 1.2;
const MONTHS_PER_YEAR: f64 = 12.0;
const MAX_MONTHLY_HOURS: f64 = 744.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetAssessmentRequest {
    /// Average load as a percentage of rating.
    pub load_factor: f64,
    /// Age in years.
    pub age: f64,
    /// Nameplate rating in kVA.
    pub rated_power: f64,
    /// Running hours per month.
    pub running_hours: f64,
}

impl Default for AssetAssessmentRequest {
    fn default() -> Self {
        Self {
            load_factor: 50.0,
            age: 5.0,
            rated_power: 100.0,
            running_hours: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssetRecommendation {
    Replace,
    Relocate,
    Keep,
    Support,
}

impl AssetRecommendation {
    pub fn action(self) -> &'static str {
        match self {
            AssetRecommendation::Replace => "Scrap & Replace with right-sized fuel cell system",
            AssetRecommendation::Relocate => "Relocate to higher-demand site",
            AssetRecommendation::Keep => "Keep & Hybridize with fuel cell for efficiency",
            AssetRecommendation::Support => "Add support capacity - current asset overloaded",
        }
    }
}

impl fmt::Display for AssetRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetRecommendation::Replace => "replace",
            AssetRecommendation::Relocate => "relocate",
            AssetRecommendation::Keep => "keep",
            AssetRecommendation::Support => "support",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetrics {
    /// Efficiency points lost to light loading.
    pub efficiency_loss: f64,
    /// Litres of diesel wasted per year through light loading.
    pub annual_waste_estimate: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetAssessment {
    pub recommendation: AssetRecommendation,
    pub action: &'static str,
    pub analysis: String,
    pub metrics: AssetMetrics,
}

fn check(field: &str, value: f64, ok: bool, reason: &str) -> AppResult<()> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(AppError::validation(
            format!("Invalid value: {field} = {value} ({reason})"),
            Some(field),
        ))
    }
}

fn validate(req: &AssetAssessmentRequest) -> AppResult<()> {
    check(
        "loadFactor",
        req.load_factor,
        (0.0..=100.0).contains(&req.load_factor),
        "must be a percentage in [0, 100]",
    )?;
    check("age", req.age, req.age >= 0.0, "must be non-negative")?;
    check("ratedPower", req.rated_power, req.rated_power > 0.0, "must be positive")?;
    check(
        "runningHours",
        req.running_hours,
        (0.0..=MAX_MONTHLY_HOURS).contains(&req.running_hours),
        "must be within one month of hours",
    )
}

pub fn recommend(load_factor: f64, age: f64) -> AssetRecommendation {
    if load_factor < UNDERLOADED_PCT {
        if age > REPLACE_AGE_YEARS {
            AssetRecommendation::Replace
        } else {
            AssetRecommendation::Relocate
        }
    } else if load_factor <= HEALTHY_MAX_PCT {
        AssetRecommendation::Keep
    } else {
        AssetRecommendation::Support
    }
}

pub fn assess_asset(req: &AssetAssessmentRequest) -> AppResult<AssetAssessment> {
    validate(req)?;

    let lf = req.load_factor;
    let recommendation = recommend(lf, req.age);
    let action = recommendation.action();

    let metrics = if lf < HEALTHY_MAX_PCT {
        let hourly_burn = req.rated_power * IDLE_BURN + req.rated_power * lf / 100.0 * LOAD_BURN;
        AssetMetrics {
            efficiency_loss: (HEALTHY_MAX_PCT - lf) * EFFICIENCY_LOSS_PER_PCT,
            annual_waste_estimate: hourly_burn
                * req.running_hours
                * MONTHS_PER_YEAR
                * LIGHT_LOAD_PENALTY
                * (1.0 - lf / 100.0),
        }
    } else {
        AssetMetrics {
            efficiency_loss: 0.0,
            annual_waste_estimate: 0.0,
        }
    };

    Ok(AssetAssessment {
        recommendation,
        action,
        analysis: format!("Generator is running at {lf}% load factor. {action}"),
        metrics,
    })
}
