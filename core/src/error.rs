use thiserror::Error;

pub type Result<T> = std::result::Result<T, TerrainError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    #[error("invalid interval: start x ({start}) must be less than end x ({end})")]
    InvalidInterval { start: f64, end: f64 },

    #[error("parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("{requested} iterations requested, at most {max} are supported")]
    TooManyIterations { requested: u32, max: u32 },

    #[error("interval became too narrow to subdivide at iteration {level}")]
    ResolutionExhausted { level: u32 },

    // Sparse layers must be strictly ascending in x
    #[error("layer point {index} at x = {x} is not to the right of its predecessor")]
    UnorderedLayer { index: usize, x: f64 },

    #[error("coordinate (column {column}, row {row}) is outside the {width}x{height} buffer")]
    OutOfRangeCoordinate {
        column: i64,
        row: i64,
        width: u32,
        height: u32,
    },

    #[error("scene has no layers")]
    EmptyScene,

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
