//! Interactive org-chart view state.
//!
//! Two independent pieces: which nodes are expanded, and the zoom/pan
//! viewport. Neither touches the hierarchy data itself.

mod expansion;
mod viewport;

pub use expansion::ExpansionState;
pub use viewport::{PointerButton, Viewport, MAX_SCALE, MIN_SCALE, SCALE_STEP};
