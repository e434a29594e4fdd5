use thiserror::Error;

/// Errors a control-plane operation can hand back instead of panicking on
/// bad input from a caller (e.g. a future control-panel process).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("lane index {index} is out of range (0..{num_lanes})")]
    LaneIndexOutOfRange { index: usize, num_lanes: usize },
    #[error("unknown ingredient {0:?}")]
    IngredientUnknown(String),
}
