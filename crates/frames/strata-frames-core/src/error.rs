//! Error types for frame table edits.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// A drawing already starts at this frame.
    #[error("Frame {frame} already holds a drawing")]
    Occupied { frame: i32 },

    #[error("Invalid frame duration: {duration}")]
    InvalidDuration { duration: i32 },
}
