use thiserror::Error;

/// Input-fatal errors: these abort the run with a non-zero exit code.
/// Per-net failures (no path found, fewer than 2 pins) are not represented
/// here — they're logged and recorded in a run summary instead.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("input file not found: {0}")]
    MissingInputFile(String),

    #[error("malformed size line {0:?}: expected '<width>x<height>'")]
    MalformedSizeLine(String),

    #[error("grid size {width}x{height} exceeds the {max} limit")]
    GridTooLarge { width: u32, height: u32, max: u32 },

    #[error("unparseable line {line_no}: {text:?}")]
    UnparseableLine { line_no: usize, text: String },

    #[error("net '{net}' has a pin at ({x}, {y}, layer {layer}) which coincides with an obstacle")]
    PinOnObstacle {
        net: String,
        x: u32,
        y: u32,
        layer: u8,
    },
}
