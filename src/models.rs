use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Everything tracked for one calendar day. Absent fields mean "not entered".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DailyRecord {
    pub calories_green_goal: Option<u32>,
    pub calories_green_actual: Option<u32>,
    pub calories_yellow_goal: Option<u32>,
    pub calories_yellow_actual: Option<u32>,
    pub calories_orange_goal: Option<u32>,
    pub calories_orange_actual: Option<u32>,
    pub steps_goal: Option<u32>,
    pub steps_actual: Option<u32>,
    pub cardio_high_intensity_minutes: Option<u32>,
    pub cardio_low_intensity_minutes: Option<u32>,
    pub strength_workout_type: Option<String>,
    pub physio_completed: Option<bool>,
    pub weight_kg: Option<f64>,
}

impl DailyRecord {
    pub fn calories_actual(&self) -> Option<u32> {
        sum_present([
            self.calories_green_actual,
            self.calories_yellow_actual,
            self.calories_orange_actual,
        ])
    }

    pub fn cardio_minutes(&self) -> Option<u32> {
        sum_present([
            self.cardio_high_intensity_minutes,
            self.cardio_low_intensity_minutes,
        ])
    }

    pub fn strength_workout(&self) -> Option<&str> {
        self.strength_workout_type
            .as_deref()
            .map(str::trim)
            .filter(|kind| !kind.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        *self == DailyRecord::default()
    }
}

fn sum_present<const N: usize>(values: [Option<u32>; N]) -> Option<u32> {
    values
        .into_iter()
        .flatten()
        .reduce(|total, value| total.saturating_add(value))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    /// Keyed by `YYYY-MM-DD`, so iteration is chronological.
    pub days: BTreeMap<String, DailyRecord>,
}

impl AppData {
    pub fn record(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.days.get(&date_key(date))
    }

    pub fn entries(&self) -> Vec<DailyEntry> {
        self.days
            .iter()
            .map(|(date, record)| DailyEntry {
                date: date.clone(),
                record: record.clone(),
            })
            .collect()
    }

    /// `[{ date, <metric>: value | null }]` for one metric.
    pub fn metric_series(&self, metric: Metric) -> Vec<serde_json::Value> {
        self.days
            .iter()
            .map(|(date, record)| {
                let mut row = serde_json::Map::new();
                row.insert("date".to_owned(), serde_json::Value::from(date.as_str()));
                row.insert(metric.key().to_owned(), metric.value_of(record).into());
                serde_json::Value::Object(row)
            })
            .collect()
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Weight,
    Calories,
    Steps,
    Cardio,
    Strength,
    Physio,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Weight,
        Metric::Calories,
        Metric::Steps,
        Metric::Cardio,
        Metric::Strength,
        Metric::Physio,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Calories => "calories",
            Metric::Steps => "steps",
            Metric::Cardio => "cardio",
            Metric::Strength => "strength",
            Metric::Physio => "physio",
        }
    }

    /// Numeric value plotted for a day. Strength and physio are 1/0 flags.
    pub fn value_of(self, record: &DailyRecord) -> Option<f64> {
        match self {
            Metric::Weight => record.weight_kg.filter(|kg| kg.is_finite()),
            Metric::Calories => record.calories_actual().map(f64::from),
            Metric::Steps => record.steps_actual.map(f64::from),
            Metric::Cardio => record.cardio_minutes().map(f64::from),
            Metric::Strength => record
                .strength_workout_type
                .as_ref()
                .map(|_| if record.strength_workout().is_some() { 1.0 } else { 0.0 }),
            Metric::Physio => record
                .physio_completed
                .map(|done| if done { 1.0 } else { 0.0 }),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.key().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("unknown metric '{raw}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: String,
    #[serde(flatten)]
    pub record: DailyRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressCard {
    pub label: String,
    pub actual: Option<f64>,
    pub goal: Option<f64>,
    pub percent: Option<f64>,
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakCard {
    pub days: u32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsSummary {
    pub date: Option<String>,
    pub progress: ProgressCard,
    pub streak: StreakCard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaloriesSummary {
    pub date: Option<String>,
    pub categories: Vec<ProgressCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardioSummary {
    pub high_intensity_minutes: u32,
    pub low_intensity_minutes: u32,
    pub active_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthSummary {
    pub sessions: u32,
    pub last_workout: Option<String>,
    pub last_workout_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysioSummary {
    pub completed_days: u32,
    pub streak: StreakCard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightSummary {
    pub latest_kg: Option<f64>,
    pub latest_date: Option<String>,
    pub change_7d: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub today: String,
    pub today_label: String,
    pub steps: StepsSummary,
    pub calories: CaloriesSummary,
    pub cardio: CardioSummary,
    pub strength: StrengthSummary,
    pub physio: PhysioSummary,
    pub weight: WeightSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_parses_case_insensitively() {
        assert_eq!("Weight".parse::<Metric>(), Ok(Metric::Weight));
        assert!("sleep".parse::<Metric>().is_err());
    }

    #[test]
    fn absent_values_stay_null() {
        let record = DailyRecord {
            cardio_low_intensity_minutes: Some(30),
            strength_workout_type: Some("  ".into()),
            ..DailyRecord::default()
        };
        assert_eq!(Metric::Weight.value_of(&record), None);
        assert_eq!(Metric::Cardio.value_of(&record), Some(30.0));
        assert_eq!(Metric::Strength.value_of(&record), Some(0.0));
        assert_eq!(Metric::Calories.value_of(&record), None);
    }

    #[test]
    fn metric_series_matches_input_contract() {
        let mut data = AppData::default();
        data.days.insert(
            "2024-01-02".into(),
            DailyRecord {
                weight_kg: Some(79.5),
                ..DailyRecord::default()
            },
        );
        data.days.insert("2024-01-01".into(), DailyRecord::default());

        let rows = metric_series_json(&data);
        assert_eq!(
            rows,
            serde_json::json!([
                { "date": "2024-01-01", "weight": null },
                { "date": "2024-01-02", "weight": 79.5 }
            ])
        );
    }

    fn metric_series_json(data: &AppData) -> serde_json::Value {
        serde_json::Value::Array(data.metric_series(Metric::Weight))
    }

    #[test]
    fn entry_flattens_record_fields() {
        let entry = DailyEntry {
            date: "2024-01-01".into(),
            record: DailyRecord {
                steps_actual: Some(4200),
                ..DailyRecord::default()
            },
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["date"], "2024-01-01");
        assert_eq!(value["steps_actual"], 4200);
    }
}
