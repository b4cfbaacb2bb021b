use super::error::{ChartError, ChartResult};
use super::markers::Marker;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in pixel space, `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LabelBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &LabelBox) -> bool {
        !(self.x2 <= other.x1 || other.x2 <= self.x1 || self.y2 <= other.y1 || other.y2 <= self.y1)
    }
}

/// Plot bounds in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ChartArea {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> ChartResult<Self> {
        let finite = [left, top, right, bottom].iter().all(|v| v.is_finite());
        if !finite || right <= left || bottom <= top {
            return Err(ChartError::InvalidArea {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Connector length before any deepening.
    pub base_depth: f64,
    pub depth_step: f64,
    pub max_attempts: u32,
    pub padding_x: f64,
    pub padding_y: f64,
    pub text_height: f64,
    /// Boxes are not pushed below `bottom - bottom_margin`.
    pub bottom_margin: f64,
    pub unit: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_depth: 12.0,
            depth_step: 20.0,
            max_attempts: 8,
            padding_x: 6.0,
            padding_y: 3.0,
            text_height: 12.0,
            bottom_margin: 4.0,
            unit: "kg".to_owned(),
        }
    }
}

impl LayoutConfig {
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (value, name) in [
            (self.depth_step, "depth_step"),
            (self.text_height, "text_height"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidLayoutConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        for (value, name) in [
            (self.base_depth, "base_depth"),
            (self.padding_x, "padding_x"),
            (self.padding_y, "padding_y"),
            (self.bottom_margin, "bottom_margin"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidLayoutConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if self.max_attempts == 0 {
            return Err(ChartError::InvalidLayoutConfig(
                "`max_attempts` must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    fn box_height(&self) -> f64 {
        self.text_height + 2.0 * self.padding_y
    }
}

pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f64;
}

/// Fixed advance per character; good enough for short numeric labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharWidthEstimate {
    pub char_width_px: f64,
}

impl Default for CharWidthEstimate {
    fn default() -> Self {
        Self { char_width_px: 7.0 }
    }
}

impl TextMeasure for CharWidthEstimate {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width_px
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Decrease,
    Increase,
    Unchanged,
}

impl Tone {
    pub fn of(delta: f64) -> Self {
        if delta < 0.0 {
            Tone::Decrease
        } else if delta > 0.0 {
            Tone::Increase
        } else {
            Tone::Unchanged
        }
    }
}

/// Signed, one decimal, unit suffixed: `-2.0 kg`.
pub fn format_delta(delta: f64, unit: &str) -> String {
    // keep -0.0 from printing as a loss
    let delta = if delta == 0.0 { 0.0 } else { delta };
    let unit = unit.trim();
    if unit.is_empty() {
        format!("{delta:+.1}")
    } else {
        format!("{delta:+.1} {unit}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutInput {
    pub marker: Marker,
    pub anchor: PixelPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLabel {
    pub marker_index: usize,
    pub label: String,
    pub anchor: PixelPoint,
    pub tick_end: PixelPoint,
    pub box_origin: PixelPoint,
    pub box_width: f64,
    pub box_height: f64,
    pub text: String,
    pub tone: Tone,
    pub depth: f64,
    pub attempts: u32,
    /// Set when the attempt budget ran out with the box still colliding.
    pub overlapping: bool,
}

impl PlacedLabel {
    pub fn bounds(&self) -> LabelBox {
        LabelBox::new(
            self.box_origin.x,
            self.box_origin.y,
            self.box_width,
            self.box_height,
        )
    }
}

/// Places one label per input below its anchor, deepening the connector
/// until the box clears every box placed before it.
///
/// Inputs are processed left to right by anchor x so earlier markers get the
/// shallow slots. Each marker gets at most `max_attempts` deepenings, so the
/// pass always terminates; residual overlap is reported, not resolved.
pub fn layout_labels(
    inputs: &[LayoutInput],
    area: ChartArea,
    config: &LayoutConfig,
    measure: &impl TextMeasure,
) -> ChartResult<Vec<PlacedLabel>> {
    config.validate()?;

    let mut order: Vec<(usize, &LayoutInput)> = inputs.iter().enumerate().collect();
    order.sort_by_key(|(position, input)| (OrderedFloat(input.anchor.x), *position));

    let floor = area.bottom - config.bottom_margin;
    let box_height = config.box_height();
    let mut placed: Vec<PlacedLabel> = Vec::with_capacity(inputs.len());

    for (_, input) in order {
        let text = format_delta(input.marker.delta, &config.unit);
        let box_width = measure.text_width(&text) + 2.0 * config.padding_x;
        let box_x = clamp_box_x(input.anchor.x, box_width, area);
        let candidate = |depth: f64| LabelBox::new(box_x, input.anchor.y + depth, box_width, box_height);

        let mut depth = config.base_depth;
        let mut current = candidate(depth);
        let mut attempts = 0;
        let mut overlapping = collides(&placed, &current);

        while overlapping && attempts < config.max_attempts {
            let next = candidate(depth + config.depth_step);
            if next.y2 > floor {
                break;
            }
            attempts += 1;
            depth += config.depth_step;
            current = next;
            overlapping = collides(&placed, &current);
        }

        if overlapping {
            debug!(
                label = %input.marker.label,
                attempts,
                "label placement budget exhausted with residual overlap"
            );
        }

        placed.push(PlacedLabel {
            marker_index: input.marker.index,
            label: input.marker.label.clone(),
            anchor: input.anchor,
            tick_end: PixelPoint::new(input.anchor.x, input.anchor.y + depth),
            box_origin: PixelPoint::new(current.x1, current.y1),
            box_width,
            box_height,
            text,
            tone: Tone::of(input.marker.delta),
            depth,
            attempts,
            overlapping,
        });
    }

    Ok(placed)
}

fn collides(placed: &[PlacedLabel], candidate: &LabelBox) -> bool {
    placed.iter().any(|label| label.bounds().overlaps(candidate))
}

fn clamp_box_x(anchor_x: f64, width: f64, area: ChartArea) -> f64 {
    if width >= area.width() {
        area.left
    } else {
        (anchor_x - 0.5 * width).clamp(area.left, area.right - width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn marker(index: usize, label: &str, delta: f64) -> Marker {
        Marker {
            x: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(index as i64),
            y: 80.0,
            index,
            label: label.to_owned(),
            delta,
        }
    }

    fn input(index: usize, x: f64, y: f64, delta: f64) -> LayoutInput {
        LayoutInput {
            marker: marker(index, &format!("m{index}"), delta),
            anchor: PixelPoint::new(x, y),
        }
    }

    fn area() -> ChartArea {
        ChartArea::new(0.0, 0.0, 400.0, 300.0).unwrap()
    }

    #[test]
    fn overlap_uses_separating_axes() {
        let a = LabelBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&LabelBox::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&LabelBox::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&LabelBox::new(0.0, 11.0, 10.0, 10.0)));
        assert!(!a.overlaps(&LabelBox::new(-20.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn distant_markers_stay_at_base_depth() {
        let config = LayoutConfig::default();
        let placed = layout_labels(
            &[input(0, 50.0, 100.0, -1.0), input(1, 300.0, 100.0, 2.0)],
            area(),
            &config,
            &CharWidthEstimate::default(),
        )
        .unwrap();

        assert!(placed.iter().all(|p| p.depth == config.base_depth));
        assert!(placed.iter().all(|p| !p.overlapping));
        assert_eq!(placed[0].tone, Tone::Decrease);
        assert_eq!(placed[1].tone, Tone::Increase);
    }

    #[test]
    fn crowded_markers_are_deepened_in_x_order() {
        let config = LayoutConfig::default();
        // right-most first in input order
        let placed = layout_labels(
            &[input(1, 110.0, 50.0, 1.0), input(0, 100.0, 50.0, -1.0)],
            area(),
            &config,
            &CharWidthEstimate::default(),
        )
        .unwrap();

        assert_eq!(placed[0].marker_index, 0);
        assert_eq!(placed[0].depth, config.base_depth);
        assert_eq!(placed[1].depth, config.base_depth + config.depth_step);
        assert!(!placed[0].bounds().overlaps(&placed[1].bounds()));
    }

    #[test]
    fn boxes_are_clamped_inside_the_area() {
        let placed = layout_labels(
            &[input(0, 1.0, 20.0, -3.0), input(1, 399.0, 20.0, 3.0)],
            area(),
            &LayoutConfig::default(),
            &CharWidthEstimate::default(),
        )
        .unwrap();

        assert_eq!(placed[0].box_origin.x, 0.0);
        let right = placed[1].box_origin.x + placed[1].box_width;
        assert!(right <= 400.0);
    }

    #[test]
    fn label_wider_than_the_area_starts_at_its_left_edge() {
        let narrow = ChartArea::new(10.0, 0.0, 40.0, 300.0).unwrap();
        let placed = layout_labels(
            &[input(0, 25.0, 20.0, -12.5), input(1, 38.0, 20.0, 3.0)],
            narrow,
            &LayoutConfig::default(),
            &CharWidthEstimate::default(),
        )
        .unwrap();

        for label in &placed {
            assert!(label.box_width > narrow.width());
            assert_eq!(label.box_origin.x, 10.0);
        }
        assert_eq!(clamp_box_x(25.0, 30.0, narrow), 10.0);
        assert_eq!(clamp_box_x(25.0, 20.0, narrow), 15.0);
    }

    #[test]
    fn floor_stops_deepening_and_reports_overlap() {
        let config = LayoutConfig::default();
        let placed = layout_labels(
            &[input(0, 100.0, 270.0, -1.0), input(1, 100.0, 270.0, -1.0)],
            area(),
            &config,
            &CharWidthEstimate::default(),
        )
        .unwrap();

        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].attempts, 0);
        assert!(placed[1].overlapping);
    }

    #[test]
    fn attempt_budget_bounds_deepening() {
        let config = LayoutConfig {
            max_attempts: 2,
            ..LayoutConfig::default()
        };
        let tall = ChartArea::new(0.0, 0.0, 400.0, 10_000.0).unwrap();
        let inputs: Vec<LayoutInput> = (0..6).map(|i| input(i, 200.0, 0.0, -1.0)).collect();

        let placed = layout_labels(&inputs, tall, &config, &CharWidthEstimate::default()).unwrap();
        assert_eq!(placed.len(), 6);
        assert!(placed.iter().all(|p| p.attempts <= 2));
        assert!(placed.last().unwrap().overlapping);
    }

    #[test]
    fn format_delta_is_signed_with_one_decimal() {
        assert_eq!(format_delta(-2.0, "kg"), "-2.0 kg");
        assert_eq!(format_delta(0.46, "kg"), "+0.5 kg");
        assert_eq!(format_delta(-0.0, "kg"), "+0.0 kg");
        assert_eq!(format_delta(1.24, ""), "+1.2");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = LayoutConfig {
            max_attempts: 0,
            ..LayoutConfig::default()
        };
        let err = layout_labels(&[], area(), &config, &CharWidthEstimate::default()).unwrap_err();
        assert!(matches!(err, ChartError::InvalidLayoutConfig(_)));
        assert!(ChartArea::new(10.0, 0.0, 10.0, 5.0).is_err());
    }
}
