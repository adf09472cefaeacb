use thiserror::Error;

#[derive(Debug, Error)]
pub enum SketchError {
    #[error("canvas size must be non-zero, got {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },

    #[error("height map has no cells")]
    EmptyMap,

    #[error("height map row {row} has {found} cells, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown sketch `{0}` (expected circle-grid, noise-graph or noise-field)")]
    UnknownSketch(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
