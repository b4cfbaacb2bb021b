//! Chart data preparation for the dashboard line charts.
//!
//! Raw `{ date, value }` records flow through [`series::normalize`], then
//! [`markers::build_markers`], are projected to pixels by the renderer and
//! finally laid out by [`layout::layout_labels`] so that annotation boxes do
//! not collide.

pub mod config;
pub mod error;
pub mod layout;
pub mod markers;
pub mod render;
pub mod series;

pub use config::{ChartConfig, DateTickFormat, FillMode, ValueFormat};
pub use error::{ChartError, ChartResult};
pub use layout::{
    CharWidthEstimate, ChartArea, LabelBox, LayoutConfig, LayoutInput, PixelPoint, PlacedLabel,
    TextMeasure, Tone, format_delta, layout_labels,
};
pub use markers::{Marker, MarkerWindows, TrailingWindow, build_markers};
pub use render::{
    Chart, ChartSurface, DrawCommand, LinearProjection, PixelProjection, PointMark, RenderPass,
    Scene, SceneRecorder, WeightChart,
};
pub use series::{Point, RawEntry, contiguous_runs, normalize, normalize_json};
