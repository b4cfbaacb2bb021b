use super::layout::Tone;
use super::markers::Marker;
use super::series::Point;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    None,
    /// Fill down to the zero line.
    Origin,
    /// Fill down to the bottom of the plot.
    Start,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueFormat {
    pub unit: String,
    pub decimals: usize,
}

impl ValueFormat {
    pub fn format_tooltip(&self, point: &Point) -> String {
        let value = format!("{:.*}", self.decimals, point.y);
        if self.unit.is_empty() {
            format!("{}: {value}", point.x.format("%-d %b %Y"))
        } else {
            format!("{}: {value} {}", point.x.format("%-d %b %Y"), self.unit)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTickFormat {
    /// strftime pattern.
    pub pattern: String,
}

impl DateTickFormat {
    pub fn format_tick(&self, date: NaiveDate) -> String {
        date.format(&self.pattern).to_string()
    }
}

/// The handful of chart options the dashboard actually sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub line_color: String,
    pub fill: FillMode,
    pub fill_color: String,
    /// Point radius by series index; `0.0` hides the point.
    pub point_radius: Vec<f64>,
    pub highlight_radius: f64,
    pub tooltip: ValueFormat,
    pub ticks: DateTickFormat,
    pub decrease_color: String,
    pub increase_color: String,
    pub unchanged_color: String,
}

impl ChartConfig {
    pub fn weight(unit: impl Into<String>) -> Self {
        Self {
            line_color: "#2f4858".to_owned(),
            fill: FillMode::Start,
            fill_color: "rgba(47, 72, 88, 0.08)".to_owned(),
            point_radius: Vec::new(),
            highlight_radius: 4.0,
            tooltip: ValueFormat {
                unit: unit.into(),
                decimals: 1,
            },
            ticks: DateTickFormat {
                pattern: "%-d %b".to_owned(),
            },
            decrease_color: "#2d7a4b".to_owned(),
            increase_color: "#c63b2b".to_owned(),
            unchanged_color: "#7a746d".to_owned(),
        }
    }

    /// Hidden point for every index.
    pub fn with_point_count(mut self, count: usize) -> Self {
        self.point_radius = vec![0.0; count];
        self
    }

    /// Shows the source point of each marker. Indices outside the radius array are ignored.
    pub fn highlight_markers(&mut self, markers: &[Marker]) {
        for marker in markers {
            if let Some(radius) = self.point_radius.get_mut(marker.index) {
                *radius = self.highlight_radius;
            }
        }
    }

    pub fn color_for(&self, tone: Tone) -> &str {
        match tone {
            Tone::Decrease => &self.decrease_color,
            Tone::Increase => &self.increase_color,
            Tone::Unchanged => &self.unchanged_color,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::weight("kg")
    }
}
