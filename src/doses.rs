//! Recurring supplement dose reminders.

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

/// Weekday index used when a weekly schedule names no valid day (Monday).
pub const DEFAULT_WEEKLY_DAY: u32 = 1;

/// Whether a dose with this frequency is due on `weekday` (0 = Sunday).
///
/// Unrecognised frequencies are treated as due so a reminder is never
/// silently dropped.
pub fn is_due_today(frequency: &str, days_of_week: Option<&str>, weekday: u32) -> bool {
    let frequency = frequency.to_lowercase();
    if frequency.contains("daily") {
        return true;
    }
    if frequency.contains("weekly") {
        let days = parse_days(days_of_week);
        if days.is_empty() {
            return weekday == DEFAULT_WEEKLY_DAY;
        }
        return days.contains(&weekday);
    }
    true
}

/// Comma-separated weekday indexes, keeping only integers in `0..=6`.
///
/// A missing or empty list yields no days; blank entries inside a list count
/// as 0.
pub fn parse_days(value: Option<&str>) -> Vec<u32> {
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        return Vec::new();
    };
    value
        .split(',')
        .filter_map(|item| match item.trim() {
            // a blank token reads as Sunday
            "" => Some(0),
            day => day.parse::<i64>().ok(),
        })
        .filter(|day| (0..=6).contains(day))
        .map(|day| day as u32)
        .collect()
}

pub fn weekday_index(weekday: Weekday) -> u32 {
    weekday.num_days_from_sunday()
}

pub fn today_index(today: impl Datelike) -> u32 {
    weekday_index(today.weekday())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseStatus {
    Due,
    Completed,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseCompletion {
    #[serde(default)]
    pub skipped: bool,
}

/// Dose schedule as loaded from storage, with today's latest completion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseSchedule {
    pub id: String,
    pub pet_id: String,
    pub pet_name: String,
    pub supplement_name: String,
    pub dosage: String,
    pub frequency: String,
    #[serde(default)]
    pub days_of_week: Option<String>,
    #[serde(default)]
    pub times: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub completion_today: Option<DoseCompletion>,
}

fn default_active() -> bool {
    true
}

impl DoseSchedule {
    pub fn status(&self) -> DoseStatus {
        match self.completion_today {
            Some(DoseCompletion { skipped: true }) => DoseStatus::Skipped,
            Some(_) => DoseStatus::Completed,
            None => DoseStatus::Due,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDose {
    pub id: String,
    pub pet_id: String,
    pub pet_name: String,
    pub supplement_name: String,
    pub dosage: String,
    pub frequency: String,
    pub times: Vec<String>,
    pub status: DoseStatus,
}

/// Active schedules due on `weekday`, in input order.
pub fn due_today(schedules: &[DoseSchedule], weekday: u32) -> Vec<DueDose> {
    schedules
        .iter()
        .filter(|schedule| schedule.active)
        .filter(|schedule| {
            is_due_today(&schedule.frequency, schedule.days_of_week.as_deref(), weekday)
        })
        .map(|schedule| DueDose {
            id: schedule.id.clone(),
            pet_id: schedule.pet_id.clone(),
            pet_name: schedule.pet_name.clone(),
            supplement_name: schedule.supplement_name.clone(),
            dosage: schedule.dosage.clone(),
            frequency: schedule.frequency.clone(),
            times: schedule.times.clone(),
            status: schedule.status(),
        })
        .collect()
}
