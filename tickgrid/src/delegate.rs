//! Per-column rendering hooks.

use crate::style::CellStyle;

/// Customizes how the cells of one column are displayed.
///
/// Delegates only affect painting; the stored cell text is untouched.
/// Implementations must be `Send + Sync` because the owning table is
/// shared behind a lock.
pub trait CellDelegate: Send + Sync {
    /// Transform the stored text before it is painted.
    fn display_text(&self, row: usize, text: &str) -> String {
        let _ = row;
        text.to_string()
    }

    /// Style override for a cell. Fields left `None` fall back to the
    /// grid style; selection and cursor backgrounds still win.
    fn cell_style(&self, row: usize, text: &str) -> CellStyle {
        let _ = (row, text);
        CellStyle::new()
    }
}
