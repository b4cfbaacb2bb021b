use super::config::{ChartConfig, FillMode};
use super::error::ChartResult;
use super::layout::{
    ChartArea, LayoutConfig, LayoutInput, PixelPoint, PlacedLabel, TextMeasure, layout_labels,
};
use super::markers::{Marker, MarkerWindows, build_markers};
use super::series::{Point, contiguous_runs};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MAX_TICKS: usize = 6;
const HEADROOM_TOP: f64 = 0.1;
// labels hang below their points
const HEADROOM_BOTTOM: f64 = 0.45;
const VALUE_SCALE: f64 = 0.25;

/// Pixel position of each series point, by index.
pub trait PixelProjection {
    fn position(&self, index: usize) -> Option<PixelPoint>;
}

/// Dates map linearly onto x, values onto y (inverted).
///
/// Values are held at a quarter scale so spans near the limits of `f64`
/// stay finite.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProjection {
    positions: Vec<PixelPoint>,
    area: ChartArea,
    lo: f64,
    hi: f64,
}

impl LinearProjection {
    pub fn new(points: &[Point], area: ChartArea) -> Self {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Self {
                positions: Vec::new(),
                area,
                lo: 0.0,
                hi: 0.0,
            };
        };

        let span_days = (last.x - first.x).num_days() as f64;
        let (mut lo, mut hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y * VALUE_SCALE), hi.max(p.y * VALUE_SCALE))
            });
        let range = hi - lo;
        if range > 0.0 {
            lo -= range * HEADROOM_BOTTOM;
            hi += range * HEADROOM_TOP;
        } else {
            lo -= VALUE_SCALE;
            hi += VALUE_SCALE;
        }

        let positions = points
            .iter()
            .map(|point| {
                let x = if span_days > 0.0 {
                    area.left + (point.x - first.x).num_days() as f64 / span_days * area.width()
                } else {
                    area.left + 0.5 * area.width()
                };
                let y = area.bottom - (point.y * VALUE_SCALE - lo) / (hi - lo) * area.height();
                PixelPoint::new(x, y)
            })
            .collect();

        Self {
            positions,
            area,
            lo,
            hi,
        }
    }

    /// Pixel row of `value`, clamped to the plot area.
    pub fn value_y(&self, value: f64) -> Option<f64> {
        if self.positions.is_empty() {
            return None;
        }
        let y = self.area.bottom
            - (value * VALUE_SCALE - self.lo) / (self.hi - self.lo) * self.area.height();
        Some(y.clamp(self.area.top, self.area.bottom))
    }

    /// Pixel row the fill runs down to, if the fill mode has one.
    pub fn baseline(&self, fill: FillMode) -> Option<f64> {
        match fill {
            FillMode::None => None,
            FillMode::Origin => self.value_y(0.0),
            FillMode::Start => (!self.positions.is_empty()).then_some(self.area.bottom),
        }
    }
}

impl PixelProjection for LinearProjection {
    fn position(&self, index: usize) -> Option<PixelPoint> {
        self.positions.get(index).copied()
    }
}

/// One series point as handed to the surface. A zero radius keeps the
/// tooltip hit area but draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMark {
    pub at: PixelPoint,
    pub radius: f64,
    pub tooltip: String,
}

/// Drawing sink for a chart pass. The overlay is drawn after the series.
pub trait ChartSurface {
    fn clear(&mut self);
    fn draw_fill(&mut self, segments: &[Vec<PixelPoint>], baseline: f64, config: &ChartConfig);
    fn draw_series(&mut self, segments: &[Vec<PixelPoint>], config: &ChartConfig);
    fn draw_points(&mut self, points: &[PointMark], config: &ChartConfig);
    fn draw_ticks(&mut self, ticks: &[(f64, String)]);
    fn draw_overlay(&mut self, labels: &[PlacedLabel], config: &ChartConfig);
    fn draw_placeholder(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Area {
        points: Vec<PixelPoint>,
        baseline: f64,
        color: String,
    },
    Polyline {
        points: Vec<PixelPoint>,
        color: String,
    },
    Point {
        at: PixelPoint,
        radius: f64,
        color: String,
        tooltip: String,
    },
    Tick {
        x: f64,
        text: String,
    },
    Connector {
        from: PixelPoint,
        to: PixelPoint,
        color: String,
    },
    Label {
        origin: PixelPoint,
        width: f64,
        height: f64,
        text: String,
        color: String,
    },
    Placeholder {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub area: ChartArea,
    pub commands: Vec<DrawCommand>,
}

/// Records draw calls so the browser can replay them on a canvas.
#[derive(Debug, Clone)]
pub struct SceneRecorder {
    scene: Scene,
}

impl SceneRecorder {
    pub fn new(width: f64, height: f64, area: ChartArea) -> Self {
        Self {
            scene: Scene {
                width,
                height,
                area,
                commands: Vec::new(),
            },
        }
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }
}

impl ChartSurface for SceneRecorder {
    fn clear(&mut self) {
        self.scene.commands.clear();
        self.scene.commands.push(DrawCommand::Clear);
    }

    fn draw_fill(&mut self, segments: &[Vec<PixelPoint>], baseline: f64, config: &ChartConfig) {
        for segment in segments {
            self.scene.commands.push(DrawCommand::Area {
                points: segment.clone(),
                baseline,
                color: config.fill_color.clone(),
            });
        }
    }

    fn draw_series(&mut self, segments: &[Vec<PixelPoint>], config: &ChartConfig) {
        for segment in segments {
            self.scene.commands.push(DrawCommand::Polyline {
                points: segment.clone(),
                color: config.line_color.clone(),
            });
        }
    }

    fn draw_points(&mut self, points: &[PointMark], config: &ChartConfig) {
        for mark in points {
            self.scene.commands.push(DrawCommand::Point {
                at: mark.at,
                radius: mark.radius,
                color: config.line_color.clone(),
                tooltip: mark.tooltip.clone(),
            });
        }
    }

    fn draw_ticks(&mut self, ticks: &[(f64, String)]) {
        for (x, text) in ticks {
            self.scene.commands.push(DrawCommand::Tick {
                x: *x,
                text: text.clone(),
            });
        }
    }

    fn draw_overlay(&mut self, labels: &[PlacedLabel], config: &ChartConfig) {
        for label in labels {
            let color = config.color_for(label.tone).to_owned();
            self.scene.commands.push(DrawCommand::Connector {
                from: label.anchor,
                to: label.tick_end,
                color: color.clone(),
            });
            self.scene.commands.push(DrawCommand::Label {
                origin: label.box_origin,
                width: label.box_width,
                height: label.box_height,
                text: label.text.clone(),
                color,
            });
        }
    }

    fn draw_placeholder(&mut self, message: &str) {
        self.scene.commands.push(DrawCommand::Placeholder {
            message: message.to_owned(),
        });
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPass {
    pub markers: Vec<Marker>,
    pub placements: Vec<PlacedLabel>,
    pub config: ChartConfig,
}

/// An owned chart instance bound to one surface.
///
/// Every `render` redraws from scratch; `destroy` hands the surface back.
pub struct Chart<S: ChartSurface> {
    surface: S,
    area: ChartArea,
    config: ChartConfig,
    layout: LayoutConfig,
}

impl<S: ChartSurface> Chart<S> {
    pub fn create(
        surface: S,
        area: ChartArea,
        config: ChartConfig,
        layout: LayoutConfig,
    ) -> ChartResult<Self> {
        layout.validate()?;
        Ok(Self {
            surface,
            area,
            config,
            layout,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn render(
        &mut self,
        points: &[Point],
        windows: &MarkerWindows,
        measure: &impl TextMeasure,
    ) -> ChartResult<RenderPass> {
        self.surface.clear();

        let mut config = self.config.clone().with_point_count(points.len());
        if points.is_empty() {
            self.surface.draw_placeholder("No data yet");
            return Ok(RenderPass {
                markers: Vec::new(),
                placements: Vec::new(),
                config,
            });
        }

        let markers = build_markers(points, windows);
        config.highlight_markers(&markers);

        let projection = LinearProjection::new(points, self.area);
        let inputs: Vec<LayoutInput> = markers
            .iter()
            .filter_map(|marker| {
                projection.position(marker.index).map(|anchor| LayoutInput {
                    marker: marker.clone(),
                    anchor,
                })
            })
            .collect();
        let placements = layout_labels(&inputs, self.area, &self.layout, measure)?;

        let segments = series_segments(points, &projection);
        if let Some(baseline) = projection.baseline(config.fill) {
            self.surface.draw_fill(&segments, baseline, &config);
        }
        self.surface.draw_series(&segments, &config);
        let marks: Vec<PointMark> = points
            .iter()
            .filter_map(|point| {
                Some(PointMark {
                    at: projection.position(point.index)?,
                    radius: config.point_radius.get(point.index).copied()?,
                    tooltip: config.tooltip.format_tooltip(point),
                })
            })
            .collect();
        self.surface.draw_points(&marks, &config);
        self.surface
            .draw_ticks(&ticks(points, &projection, &config));
        self.surface.draw_overlay(&placements, &config);

        debug!(
            points = points.len(),
            markers = markers.len(),
            "chart pass complete"
        );

        Ok(RenderPass {
            markers,
            placements,
            config,
        })
    }

    pub fn destroy(self) -> S {
        self.surface
    }
}

/// Everything the dashboard needs to paint the weight chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightChart {
    pub points: Vec<Point>,
    pub markers: Vec<Marker>,
    pub placements: Vec<PlacedLabel>,
    pub config: ChartConfig,
    pub scene: Scene,
}

impl WeightChart {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        points: Vec<Point>,
        windows: &MarkerWindows,
        width: f64,
        height: f64,
        area: ChartArea,
        config: ChartConfig,
        layout: LayoutConfig,
        measure: &impl TextMeasure,
    ) -> ChartResult<Self> {
        let recorder = SceneRecorder::new(width, height, area);
        let mut chart = Chart::create(recorder, area, config, layout)?;
        let pass = chart.render(&points, windows, measure)?;
        let scene = chart.destroy().into_scene();

        Ok(Self {
            points,
            markers: pass.markers,
            placements: pass.placements,
            config: pass.config,
            scene,
        })
    }
}

/// Runs of consecutive calendar days; a missing day breaks the line.
fn series_segments(points: &[Point], projection: &impl PixelProjection) -> Vec<Vec<PixelPoint>> {
    contiguous_runs(points)
        .iter()
        .map(|run| {
            run.iter()
                .filter_map(|point| projection.position(point.index))
                .collect::<Vec<_>>()
        })
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn ticks(
    points: &[Point],
    projection: &impl PixelProjection,
    config: &ChartConfig,
) -> Vec<(f64, String)> {
    let step = points.len().div_ceil(MAX_TICKS).max(1);
    points
        .iter()
        .step_by(step)
        .filter_map(|point| {
            let position = projection.position(point.index)?;
            Some((position.x, config.ticks.format_tick(point.x)))
        })
        .collect()
}
