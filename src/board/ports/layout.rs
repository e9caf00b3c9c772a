//! Layout port: the rendering layer's measured geometry.

use crate::board::domain::BoardLayout;

/// Source of the currently rendered board geometry.
///
/// Implemented by the rendering layer, which measures its columns and cards
/// on demand. Measurement must be cheap; it runs on every pointer move.
pub trait LayoutSource {
    /// Measures the board as currently rendered.
    fn board_layout(&self) -> BoardLayout;
}

impl LayoutSource for BoardLayout {
    fn board_layout(&self) -> BoardLayout {
        self.clone()
    }
}
