use super::series::Point;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const START_LABEL: &str = "start";
const YEAR_DAYS: u32 = 365;

/// An annotation tied to a source point, carrying the change up to the last point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub x: NaiveDate,
    pub y: f64,
    pub index: usize,
    pub label: String,
    pub delta: f64,
}

impl Marker {
    fn anchored(anchor: &Point, last: &Point, label: impl Into<String>) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y,
            index: anchor.index,
            label: label.into(),
            delta: last.y - anchor.y,
        }
    }
}

/// A trailing period of `days` days that includes the most recent day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrailingWindow {
    pub days: u32,
}

impl TrailingWindow {
    pub const fn new(days: u32) -> Self {
        Self { days }
    }

    pub fn label(&self) -> String {
        if self.days == YEAR_DAYS {
            "1y".to_owned()
        } else {
            format!("{}d", self.days)
        }
    }

    /// Latest date an anchor may have: day offsets run from 0 to `days - 1`.
    pub fn anchor_target(&self, last: NaiveDate) -> NaiveDate {
        last - Duration::days(i64::from(self.days.saturating_sub(1)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerWindows(Vec<TrailingWindow>);

impl MarkerWindows {
    /// Sorted ascending; zero-length and duplicate windows are dropped.
    pub fn new(days: impl IntoIterator<Item = u32>) -> Self {
        let mut windows: Vec<TrailingWindow> = days
            .into_iter()
            .filter(|days| *days > 0)
            .map(TrailingWindow::new)
            .collect();
        windows.sort();
        windows.dedup();
        Self(windows)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailingWindow> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MarkerWindows {
    fn default() -> Self {
        Self::new([7, 30, 90, 180])
    }
}

impl fmt::Display for MarkerWindows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|w| w.days.to_string()).collect();
        f.write_str(&parts.join(","))
    }
}

impl FromStr for MarkerWindows {
    type Err = std::num::ParseIntError;

    /// Parses `"7,30,90"`; blank segments are ignored.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let days = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(days))
    }
}

/// Builds the start marker followed by one marker per resolvable trailing window.
pub fn build_markers(points: &[Point], windows: &MarkerWindows) -> Vec<Marker> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };

    let mut markers = Vec::with_capacity(windows.len() + 1);
    markers.push(Marker::anchored(first, last, START_LABEL));

    for window in windows.iter() {
        let Some(anchor) = find_anchor(points, window.anchor_target(last.x)) else {
            continue;
        };
        if window.days >= YEAR_DAYS && anchor.index == first.index {
            continue;
        }
        markers.push(Marker::anchored(anchor, last, window.label()));
    }

    markers
}

fn find_anchor(points: &[Point], target: NaiveDate) -> Option<&Point> {
    points.iter().rev().find(|point| point.x <= target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::series::{RawEntry, normalize};

    fn series(entries: &[(&str, f64)]) -> Vec<Point> {
        let raw: Vec<RawEntry> = entries
            .iter()
            .map(|(date, value)| RawEntry::new(*date, Some(*value)))
            .collect();
        normalize(&raw)
    }

    #[test]
    fn empty_series_has_no_markers() {
        assert!(build_markers(&[], &MarkerWindows::default()).is_empty());
    }

    #[test]
    fn single_point_emits_start_only() {
        let points = series(&[("2024-01-01", 80.0)]);
        let markers = build_markers(&points, &MarkerWindows::default());
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].label, START_LABEL);
        assert_eq!(markers[0].delta, 0.0);
    }

    #[test]
    fn one_week_span_resolves_seven_day_window_only() {
        let points = series(&[("2024-01-01", 80.0), ("2024-01-08", 78.0)]);
        let markers = build_markers(&points, &MarkerWindows::default());

        let labels: Vec<&str> = markers.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["start", "7d"]);
        assert_eq!(markers[0].delta, -2.0);
        assert_eq!(markers[1].index, 0);
    }

    #[test]
    fn gap_resolves_to_latest_point_before_target() {
        // day 0 and day 10; the 7d target is day 4
        let points = series(&[("2024-03-01", 90.0), ("2024-03-11", 88.5)]);
        let windows = MarkerWindows::new([7]);
        let markers = build_markers(&points, &windows);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[1].x, points[0].x);
        assert_eq!(markers[1].delta, -1.5);
    }

    #[test]
    fn window_anchor_respects_inclusive_convention() {
        // 7d target for 2024-01-08 is 2024-01-02
        let points = series(&[
            ("2024-01-01", 81.0),
            ("2024-01-02", 80.0),
            ("2024-01-03", 79.0),
            ("2024-01-08", 78.0),
        ]);
        let markers = build_markers(&points, &MarkerWindows::new([7]));
        assert_eq!(markers[1].x, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(markers[1].delta, -2.0);
    }

    #[test]
    fn year_window_is_skipped_when_it_duplicates_start() {
        let points = series(&[("2024-01-01", 100.0), ("2025-03-01", 90.0)]);
        let markers = build_markers(&points, &MarkerWindows::new([30, 365]));
        let labels: Vec<&str> = markers.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["start", "30d"]);
    }

    #[test]
    fn year_window_is_kept_with_a_distinct_anchor() {
        let points = series(&[
            ("2023-01-01", 110.0),
            ("2024-01-01", 100.0),
            ("2025-01-01", 90.0),
        ]);
        let markers = build_markers(&points, &MarkerWindows::new([365]));
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[1].label, "1y");
        assert_eq!(markers[1].delta, -10.0);
    }

    #[test]
    fn windows_parse_from_env_style_list() {
        let windows: MarkerWindows = " 90, 7 ,,30".parse().unwrap();
        assert_eq!(windows.to_string(), "7,30,90");
        assert!("7,x".parse::<MarkerWindows>().is_err());
    }
}
