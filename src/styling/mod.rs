//! Styling for the axes decoration.
//!
//! Style state is an immutable value ([`AxesStyle`]); frame-to-frame changes
//! are discovered with an explicit [`AxesStyle::diff`] whose result maps
//! deterministically onto the GPU resources the renderer must rebuild,
//! instead of implicit dirty flags scattered through an update path.

pub mod axes;

pub use axes::{validate_style, AxesStyle, Rebuilds, StyleDiff, StyleError};
