use crate::chart::{MarkerWindows, RawEntry, TrailingWindow, build_markers, normalize};
use crate::models::{
    AppData, CaloriesSummary, CardioSummary, DailyRecord, PhysioSummary, ProgressCard,
    StepsSummary, StreakCard, StrengthSummary, SummaryResponse, WeightSummary, date_key,
};
use chrono::{Duration, Local, NaiveDate};

const RECENT_DAYS: i64 = 7;

pub fn build_summary(data: &AppData) -> SummaryResponse {
    build_summary_at(Local::now().date_naive(), data)
}

pub fn build_summary_at(today: NaiveDate, data: &AppData) -> SummaryResponse {
    SummaryResponse {
        today: date_key(today),
        today_label: format_day_label(today),
        steps: steps_summary(today, data),
        calories: calories_summary(today, data),
        cardio: cardio_summary(today, data),
        strength: strength_summary(today, data),
        physio: physio_summary(today, data),
        weight: weight_summary(today, data),
    }
}

/// Percentage of `goal` reached, one decimal, not capped at 100.
pub fn percent_of_goal(actual: f64, goal: f64) -> Option<f64> {
    if !actual.is_finite() || !goal.is_finite() || goal <= 0.0 {
        return None;
    }
    Some((actual / goal * 1000.0).round() / 10.0)
}

/// Progress bar fill in `0.0..=1.0`.
pub fn progress_fraction(percent: Option<f64>) -> f64 {
    percent.map_or(0.0, |percent| (percent / 100.0).clamp(0.0, 1.0))
}

/// Consecutive days meeting `done`, ending today.
///
/// Today only counts once it qualifies, so an unfinished today does not break
/// a streak that ran through yesterday.
pub fn streak(data: &AppData, today: NaiveDate, done: impl Fn(&DailyRecord) -> bool) -> u32 {
    let qualifies = |date: NaiveDate| data.record(date).is_some_and(&done);

    let mut day = if qualifies(today) {
        today
    } else {
        today - Duration::days(1)
    };
    let mut count = 0;
    while qualifies(day) {
        count += 1;
        day -= Duration::days(1);
    }
    count
}

pub fn streak_message(days: u32) -> String {
    match days {
        0 => "Start a new streak today".to_owned(),
        1 => "Day one done, keep it going".to_owned(),
        2..=6 => format!("{days} days in a row"),
        7..=29 => format!("{days} day streak, great consistency"),
        _ => format!("{days} day streak, unstoppable"),
    }
}

/// `Mon 5 Jan`
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%a %-d %b").to_string()
}

fn streak_card(days: u32) -> StreakCard {
    StreakCard {
        days,
        message: streak_message(days),
    }
}

fn progress_card(label: &str, actual: Option<u32>, goal: Option<u32>) -> ProgressCard {
    let actual = actual.map(f64::from);
    let goal = goal.map(f64::from);
    let percent = actual.zip(goal).and_then(|(a, g)| percent_of_goal(a, g));
    ProgressCard {
        label: label.to_owned(),
        actual,
        goal,
        percent,
        progress: progress_fraction(percent),
    }
}

/// Records dated on or before `today`, newest first.
fn history(data: &AppData, today: NaiveDate) -> impl Iterator<Item = (NaiveDate, &DailyRecord)> {
    data.days
        .iter()
        .rev()
        .filter_map(|(key, record)| Some((key.parse::<NaiveDate>().ok()?, record)))
        .filter(move |(date, _)| *date <= today)
}

fn recent(data: &AppData, today: NaiveDate) -> impl Iterator<Item = (NaiveDate, &DailyRecord)> {
    let start = today - Duration::days(RECENT_DAYS - 1);
    history(data, today).take_while(move |(date, _)| *date >= start)
}

fn met_steps_goal(record: &DailyRecord) -> bool {
    matches!(
        (record.steps_actual, record.steps_goal),
        (Some(actual), Some(goal)) if actual >= goal
    )
}

fn steps_summary(today: NaiveDate, data: &AppData) -> StepsSummary {
    let latest = history(data, today).find(|(_, record)| record.steps_actual.is_some());
    let progress = match latest {
        Some((_, record)) => progress_card("Steps", record.steps_actual, record.steps_goal),
        None => progress_card("Steps", None, None),
    };

    StepsSummary {
        date: latest.map(|(date, _)| date_key(date)),
        progress,
        streak: streak_card(streak(data, today, met_steps_goal)),
    }
}

fn calories_summary(today: NaiveDate, data: &AppData) -> CaloriesSummary {
    let latest = history(data, today).find(|(_, record)| record.calories_actual().is_some());
    let Some((date, record)) = latest else {
        return CaloriesSummary {
            date: None,
            categories: Vec::new(),
        };
    };

    CaloriesSummary {
        date: Some(date_key(date)),
        categories: vec![
            progress_card("Green", record.calories_green_actual, record.calories_green_goal),
            progress_card("Yellow", record.calories_yellow_actual, record.calories_yellow_goal),
            progress_card("Orange", record.calories_orange_actual, record.calories_orange_goal),
        ],
    }
}

fn cardio_summary(today: NaiveDate, data: &AppData) -> CardioSummary {
    recent(data, today).fold(
        CardioSummary {
            high_intensity_minutes: 0,
            low_intensity_minutes: 0,
            active_days: 0,
        },
        |mut acc, (_, record)| {
            let high = record.cardio_high_intensity_minutes.unwrap_or(0);
            let low = record.cardio_low_intensity_minutes.unwrap_or(0);
            acc.high_intensity_minutes = acc.high_intensity_minutes.saturating_add(high);
            acc.low_intensity_minutes = acc.low_intensity_minutes.saturating_add(low);
            if high.saturating_add(low) > 0 {
                acc.active_days += 1;
            }
            acc
        },
    )
}

fn strength_summary(today: NaiveDate, data: &AppData) -> StrengthSummary {
    let sessions = recent(data, today)
        .filter(|(_, record)| record.strength_workout().is_some())
        .count() as u32;
    let last = history(data, today)
        .find_map(|(date, record)| record.strength_workout().map(|kind| (date, kind)));

    StrengthSummary {
        sessions,
        last_workout: last.map(|(_, kind)| kind.to_owned()),
        last_workout_date: last.map(|(date, _)| date_key(date)),
    }
}

fn physio_summary(today: NaiveDate, data: &AppData) -> PhysioSummary {
    let completed_days = recent(data, today)
        .filter(|(_, record)| record.physio_completed == Some(true))
        .count() as u32;

    PhysioSummary {
        completed_days,
        streak: streak_card(streak(data, today, |record| {
            record.physio_completed == Some(true)
        })),
    }
}

fn weight_summary(today: NaiveDate, data: &AppData) -> WeightSummary {
    let entries: Vec<RawEntry> = history(data, today)
        .map(|(date, record)| RawEntry::new(date_key(date), record.weight_kg))
        .collect();
    let points = normalize(&entries);
    let last = points.last();

    let week = TrailingWindow::new(RECENT_DAYS as u32);
    let change_7d = build_markers(&points, &MarkerWindows::new([week.days]))
        .into_iter()
        .find(|marker| marker.label == week.label())
        .map(|marker| (marker.delta * 10.0).round() / 10.0);

    WeightSummary {
        latest_kg: last.map(|point| point.y),
        latest_date: last.map(|point| date_key(point.x)),
        change_7d,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn insert(data: &mut AppData, date: NaiveDate, record: DailyRecord) {
        data.days.insert(date_key(date), record);
    }

    fn steps(actual: u32, goal: u32) -> DailyRecord {
        DailyRecord {
            steps_actual: Some(actual),
            steps_goal: Some(goal),
            ..DailyRecord::default()
        }
    }

    #[test]
    fn percent_of_goal_handles_missing_goal() {
        assert_eq!(percent_of_goal(1500.0, 2000.0), Some(75.0));
        assert_eq!(percent_of_goal(2500.0, 2000.0), Some(125.0));
        assert_eq!(percent_of_goal(1.0, 3.0), Some(33.3));
        assert_eq!(percent_of_goal(100.0, 0.0), None);
        assert_eq!(progress_fraction(Some(125.0)), 1.0);
        assert_eq!(progress_fraction(None), 0.0);
    }

    #[test]
    fn streak_tolerates_unfinished_today() {
        let mut data = AppData::default();
        insert(&mut data, day(3), steps(3000, 2000));
        insert(&mut data, day(4), steps(2500, 2000));
        insert(&mut data, day(5), steps(100, 2000));

        assert_eq!(streak(&data, day(5), met_steps_goal), 2);
        insert(&mut data, day(5), steps(2100, 2000));
        assert_eq!(streak(&data, day(5), met_steps_goal), 3);
    }

    #[test]
    fn streak_breaks_on_missing_day() {
        let mut data = AppData::default();
        insert(&mut data, day(1), steps(3000, 2000));
        insert(&mut data, day(3), steps(3000, 2000));
        assert_eq!(streak(&data, day(3), met_steps_goal), 1);
    }

    #[test]
    fn streak_messages_scale_with_length() {
        assert_eq!(streak_message(0), "Start a new streak today");
        assert_eq!(streak_message(3), "3 days in a row");
        assert!(streak_message(10).starts_with("10 day streak"));
    }

    #[test]
    fn day_label_format() {
        assert_eq!(format_day_label(day(5)), "Mon 5 Jan");
    }

    #[test]
    fn summary_collects_cards() {
        let mut data = AppData::default();
        insert(
            &mut data,
            day(1),
            DailyRecord {
                weight_kg: Some(130.0),
                strength_workout_type: Some("Core".into()),
                ..DailyRecord::default()
            },
        );
        insert(
            &mut data,
            day(8),
            DailyRecord {
                weight_kg: Some(128.4),
                cardio_low_intensity_minutes: Some(30),
                physio_completed: Some(true),
                calories_green_goal: Some(1000),
                calories_green_actual: Some(900),
                ..steps(2500, 2000)
            },
        );
        // future entries are ignored
        insert(&mut data, day(20), steps(1, 2000));

        let summary = build_summary_at(day(8), &data);
        assert_eq!(summary.steps.progress.percent, Some(125.0));
        assert_eq!(summary.steps.streak.days, 1);
        assert_eq!(summary.calories.categories[0].percent, Some(90.0));
        assert_eq!(summary.calories.categories[1].percent, None);
        assert_eq!(summary.cardio.low_intensity_minutes, 30);
        assert_eq!(summary.cardio.active_days, 1);
        assert_eq!(summary.strength.sessions, 0);
        assert_eq!(summary.strength.last_workout.as_deref(), Some("Core"));
        assert_eq!(summary.physio.streak.days, 1);
        assert_eq!(summary.weight.latest_kg, Some(128.4));
        assert_eq!(summary.weight.change_7d, Some(-1.6));
    }

    #[test]
    fn weight_change_is_measured_over_the_trailing_week() {
        let mut data = AppData::default();
        for (d, kg) in [(1, 130.0), (2, 129.0), (9, 128.0)] {
            insert(
                &mut data,
                day(d),
                DailyRecord {
                    weight_kg: Some(kg),
                    ..DailyRecord::default()
                },
            );
        }

        let summary = build_summary_at(day(9), &data);
        assert_eq!(summary.weight.change_7d, Some(-1.0));

        insert(
            &mut data,
            day(10),
            DailyRecord {
                weight_kg: Some(127.5),
                ..DailyRecord::default()
            },
        );
        assert_eq!(build_summary_at(day(10), &data).weight.change_7d, Some(-1.5));
    }
}
