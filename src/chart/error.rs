use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("invalid chart area: left={left}, top={top}, right={right}, bottom={bottom}")]
    InvalidArea {
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    },

    #[error("invalid layout config: {0}")]
    InvalidLayoutConfig(String),
}
