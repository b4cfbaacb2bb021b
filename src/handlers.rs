use crate::chart::{
    CharWidthEstimate, ChartArea, ChartConfig, LayoutConfig, WeightChart, normalize_json,
};
use crate::errors::AppError;
use crate::models::{
    ChartQuery, DailyEntry, HealthResponse, Metric, SummaryResponse, date_key,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::summary::{build_summary, format_day_label};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

const DEFAULT_CHART_WIDTH: f64 = 800.0;
const DEFAULT_CHART_HEIGHT: f64 = 320.0;
const MAX_CHART_SIDE: f64 = 4096.0;
// left, top, right, bottom
const CHART_PADDING: (f64, f64, f64, f64) = (44.0, 20.0, 20.0, 30.0);

pub async fn index() -> Html<String> {
    Html(render_index(&format_day_label(Local::now().date_naive())))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_owned(),
        message: "Health Tracker API is running".to_owned(),
    })
}

pub async fn list_daily_data(State(state): State<AppState>) -> Json<Vec<DailyEntry>> {
    let data = state.data.lock().await;
    Json(data.entries())
}

pub async fn upsert_daily_data(
    State(state): State<AppState>,
    Json(payload): Json<DailyEntry>,
) -> Result<Json<DailyEntry>, AppError> {
    let date = payload
        .date
        .trim()
        .parse::<NaiveDate>()
        .map_err(|_| AppError::bad_request("date must be formatted as YYYY-MM-DD"))?;
    if payload.record.weight_kg.is_some_and(|kg| !kg.is_finite() || kg <= 0.0) {
        return Err(AppError::bad_request("weight_kg must be a positive number"));
    }

    let key = date_key(date);
    let mut data = state.data.lock().await;
    data.days.insert(key.clone(), payload.record.clone());
    persist_data(&state.config.data_path, &data).await?;
    info!(date = %key, "stored daily record");

    Ok(Json(DailyEntry {
        date: key,
        record: payload.record,
    }))
}

pub async fn get_metric(
    State(state): State<AppState>,
    Path(metric): Path<String>,
) -> Result<Json<Vec<serde_json::Value>>, AppError> {
    let metric = metric.parse::<Metric>().map_err(AppError::bad_request)?;
    let data = state.data.lock().await;
    Ok(Json(data.metric_series(metric)))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let data = state.data.lock().await;
    Json(build_summary(&data))
}

pub async fn get_weight_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<WeightChart>, AppError> {
    let width = query.width.unwrap_or(DEFAULT_CHART_WIDTH);
    let height = query.height.unwrap_or(DEFAULT_CHART_HEIGHT);
    if !(width.is_finite() && height.is_finite()) || width > MAX_CHART_SIDE || height > MAX_CHART_SIDE {
        return Err(AppError::bad_request("chart size out of range"));
    }

    let (left, top, right, bottom) = CHART_PADDING;
    let area = ChartArea::new(left, top, width - right, height - bottom)?;

    let raw = {
        let data = state.data.lock().await;
        serde_json::Value::Array(data.metric_series(Metric::Weight))
    };
    let points = normalize_json(&raw, Metric::Weight.key());

    let unit = state.config.weight_unit.clone();
    let chart = WeightChart::build(
        points,
        &state.config.weight_windows,
        width,
        height,
        area,
        ChartConfig::weight(unit.clone()),
        LayoutConfig::default().with_unit(unit),
        &CharWidthEstimate::default(),
    )?;
    debug!(
        points = chart.points.len(),
        placements = chart.placements.len(),
        "weight chart built"
    );

    Ok(Json(chart))
}
