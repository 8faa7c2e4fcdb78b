//! Strata Frames Core
//!
//! Frame tables: sorted maps from timeline frame to the drawing shown from that
//! frame on. A drawing stays visible until the next key; a null frame ends it.

pub mod error;
pub mod frame;
pub mod table;

pub use error::FrameError;
pub use frame::DrawingFrame;
pub use table::FrameTable;
