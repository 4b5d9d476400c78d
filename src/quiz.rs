//! Longevity readiness quiz: scoring, recommendations and result insights.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const CONCERN_JOINT_MOBILITY: &str = "joint_mobility";
pub const CONCERN_ENERGY: &str = "energy";
pub const CONCERN_LOY002: &str = "loy002";

/// Concern keys offered by the quiz, with their labels.
pub const QUIZ_CONCERNS: [(&str, &str); 6] = [
    (CONCERN_JOINT_MOBILITY, "Joint pain / mobility decline"),
    (CONCERN_ENERGY, "Energy / lethargy"),
    ("weight", "Weight management"),
    ("cognitive", "Cognitive decline"),
    (CONCERN_LOY002, "Preparing for LOY-002"),
    ("general_longevity", "General longevity / more years together"),
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizInput {
    pub age: f64,
    pub weight: f64,
    pub concerns: BTreeSet<String>,
    pub breed_avg_lifespan: f64,
}

impl QuizInput {
    fn has(&self, concern: &str) -> bool {
        self.concerns.contains(concern)
    }

    // age and weight both inside the LOY-002 target window
    fn in_loy_window(&self) -> bool {
        self.age >= 10.0 && self.weight >= 14.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    pub score: u8,
    pub recommendations: Vec<String>,
}

/// Readiness score in `[0, 100]`.
pub fn score(input: &QuizInput) -> u8 {
    let mut score: i32 = 30;

    if input.in_loy_window() {
        score += 20;
    } else if input.age >= 7.0 {
        score += 10;
    }

    let runway = input.breed_avg_lifespan - input.age;
    score += if runway > 3.0 {
        15
    } else if runway > 1.0 {
        10
    } else {
        5
    };

    if input.has(CONCERN_LOY002) {
        score += 10;
    }
    if input.concerns.len() >= 2 {
        score += 5;
    }
    if input.has(CONCERN_JOINT_MOBILITY) || input.has(CONCERN_ENERGY) {
        score += 5;
    }

    score.clamp(0, 100) as u8
}

/// At most three recommendations, in a fixed order.
pub fn recommendations(input: &QuizInput, dog_name: &str, breed: &str) -> Vec<String> {
    let mut recs = Vec::with_capacity(3);

    if input.in_loy_window() {
        recs.push(format!(
            "{dog_name} may qualify for LOY-002 when it launches. Join the waitlist to get updates first."
        ));
    }

    if input.has(CONCERN_JOINT_MOBILITY) {
        recs.push(format!(
            "Mobility support for {breed}: consider discussing glucosamine-based joint support with your veterinarian."
        ));
    } else if input.has(CONCERN_ENERGY) {
        recs.push(format!(
            "Energy support plan: discuss omega-3s and CoQ10 options for {dog_name} with your vet."
        ));
    }

    recs.push(format!(
        "Start tracking {dog_name}'s daily health signals to improve this readiness score over time."
    ));
    recs.truncate(3);
    recs
}

pub fn evaluate(input: &QuizInput, dog_name: &str, breed: &str) -> QuizResult {
    QuizResult {
        score: score(input),
        recommendations: recommendations(input, dog_name, breed),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Critical,
    Improve,
    Optimize,
    Excellent,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => ScoreBand::Critical,
            31..=50 => ScoreBand::Improve,
            51..=70 => ScoreBand::Optimize,
            _ => ScoreBand::Excellent,
        }
    }
}

pub fn interpretation(score: u8, dog_name: &str) -> String {
    match ScoreBand::from_score(score) {
        ScoreBand::Critical => format!(
            "⚠️ {dog_name} needs attention. There are important steps you can take right now."
        ),
        ScoreBand::Improve => format!(
            "🟡 {dog_name} has room to improve. Small changes could add months to years."
        ),
        ScoreBand::Optimize => format!(
            "💛 {dog_name} is on the right track. Let's optimize for maximum longevity."
        ),
        ScoreBand::Excellent => format!(
            "💚 {dog_name} is in great shape! Stay ahead with ongoing monitoring."
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyEligibility {
    pub status: &'static str,
    pub breed_status: &'static str,
}

pub fn loy_eligibility(age: f64, weight: f64) -> LoyEligibility {
    if age >= 10.0 && weight >= 14.0 {
        LoyEligibility {
            status: "Likely eligible window",
            breed_status: "potentially eligible now",
        }
    } else if age >= 8.0 && weight >= 12.0 {
        LoyEligibility {
            status: "Near-eligible, watch timeline",
            breed_status: "potentially eligible soon",
        }
    } else {
        LoyEligibility {
            status: "Not yet in target window",
            breed_status: "not yet in an eligible age/weight window",
        }
    }
}

/// Stable 31-multiplier string hash over UTF-16 code units.
///
/// Wraps at 32 bits and returns the magnitude, so results must stay identical
/// to values already shown to users.
pub fn breed_hash(value: &str) -> u32 {
    value
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

/// Points a breed is expected to gain from tracking, 19 to 27.
pub fn breed_tracking_lift(breed: &str) -> u32 {
    let normalized = breed.trim().to_lowercase();
    19 + breed_hash(&normalized) % 9
}

/// Number of breed risks to highlight, 3 to 6. Uses the breed name verbatim.
pub fn breed_risk_count(breed: &str) -> u32 {
    3 + breed_hash(breed) % 4
}

/// Suggested number of supplements, 2 to 5.
pub fn supplement_count(age: f64, concern: &str) -> u32 {
    let boost = if concern.contains("joint") || concern.contains("mobility") {
        1.0
    } else {
        0.0
    };
    // half-up rounding
    let base = (age / 4.0 + 0.5).floor();
    (base + 1.0 + boost).max(2.0).min(5.0) as u32
}
