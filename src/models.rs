use serde::{Deserialize, Serialize};

use crate::breed::DEFAULT_AVERAGE_LIFESPAN;
use crate::doses::{DoseSchedule, DueDose};
use crate::error::AppError;
use crate::quiz::{LoyEligibility, QuizInput, ScoreBand};
use crate::subscription::SubscriptionStatus;

// Quiz submission as posted by the quiz page
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub dog_name: String,
    pub breed: String,
    pub age: f64,
    pub weight: f64,
    pub concerns: Vec<String>,
    // average lifespan from the breed profile, when the caller has one
    #[serde(default)]
    pub breed_avg_lifespan: Option<f64>,
}

impl QuizSubmission {
    /// Check field bounds and trim names. Returns the scoring input.
    pub fn validate(&mut self) -> Result<QuizInput, AppError> {
        self.dog_name = self.dog_name.trim().to_string();
        self.breed = self.breed.trim().to_string();

        let dog_name_len = self.dog_name.chars().count();
        let breed_len = self.breed.chars().count();
        let valid = (1..=64).contains(&dog_name_len)
            && (2..=80).contains(&breed_len)
            && self.age.fract() == 0.0
            && (1.0..=30.0).contains(&self.age)
            && (1.0..=400.0).contains(&self.weight)
            && (1..=6).contains(&self.concerns.len());
        if !valid {
            return Err(AppError::InvalidPayload("Invalid quiz submission.".to_string()));
        }

        Ok(QuizInput {
            age: self.age,
            weight: self.weight,
            concerns: self.concerns.iter().cloned().collect(),
            breed_avg_lifespan: self.breed_avg_lifespan.unwrap_or(DEFAULT_AVERAGE_LIFESPAN),
        })
    }

    pub fn primary_concern(&self) -> &str {
        self.concerns.first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuizReport {
    pub score: u8,
    pub band: ScoreBand,
    pub interpretation: String,
    pub recommendations: Vec<String>,
    pub loy_eligibility: LoyEligibility,
    pub breed_lifespan_range: String,
    pub tracking_lift: u32,
    pub risk_count: u32,
    pub supplement_count: u32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DosesTodayRequest {
    // 0 = Sunday; defaults to the server's current day
    #[serde(default)]
    pub weekday: Option<u32>,
    pub schedules: Vec<DoseSchedule>,
}

#[derive(Serialize, Debug, Clone)]
pub struct DosesTodayResponse {
    pub items: Vec<DueDose>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatusResponse {
    pub active: bool,
    pub effective_status: SubscriptionStatus,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RateLimitQuery {
    // user or account id appended to the action key
    #[serde(default)]
    pub subject: Option<String>,
}
