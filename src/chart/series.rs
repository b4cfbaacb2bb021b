use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw `{ date, value }` record as delivered by the data API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub date: String,
    pub value: Option<f64>,
}

impl RawEntry {
    pub fn new(date: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// One plotted point. `index` is its position in the normalized sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: NaiveDate,
    pub y: f64,
    pub index: usize,
}

/// Drops incomplete entries, sorts by date and numbers the survivors.
pub fn normalize(entries: &[RawEntry]) -> Vec<Point> {
    let mut kept: Vec<(NaiveDate, f64)> = entries
        .iter()
        .filter_map(|entry| {
            let value = entry.value.filter(|value| value.is_finite())?;
            let date = parse_date(&entry.date)?;
            Some((date, value))
        })
        .collect();

    kept.sort_by_key(|(date, _)| *date);

    kept.into_iter()
        .enumerate()
        .map(|(index, (x, y))| Point { x, y, index })
        .collect()
}

/// Reads `[{ "date": "...", "<metric>": number | null }]`.
///
/// Anything that is not an array yields an empty series.
pub fn normalize_json(value: &Value, metric: &str) -> Vec<Point> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    let entries: Vec<RawEntry> = items
        .iter()
        .filter_map(|item| {
            let object = item.as_object()?;
            let date = object.get("date")?.as_str()?;
            Some(RawEntry::new(date, object.get(metric).and_then(Value::as_f64)))
        })
        .collect();

    normalize(&entries)
}

/// Splits a sorted series into runs of consecutive calendar days.
///
/// A missing day starts a new run. When several points share a day only the
/// later one is kept. Work is linear in the number of points, whatever the
/// date span.
pub fn contiguous_runs(points: &[Point]) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for point in points {
        if let Some(previous) = current.last() {
            let gap = point.x.signed_duration_since(previous.x).num_days();
            if gap == 0 {
                current.pop();
            } else if gap > 1 {
                runs.push(std::mem::take(&mut current));
            }
        }
        current.push(*point);
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    raw.parse::<NaiveDateTime>().ok().map(|stamp| stamp.date())
}
