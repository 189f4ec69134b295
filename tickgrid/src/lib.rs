//! A checkbox-column table widget.
//!
//! [`CheckTable`] wraps a [`GridBackend`] and reserves that grid's first
//! physical column for per-row checkboxes, paired with a select-all
//! checkbox in the header. The public API hides the reserved column:
//! callers address data columns starting at 0 and the decorator remaps
//! every call onto the shifted physical grid. Row checkboxes and the
//! header checkbox stay synchronized in both directions, and toggling a
//! row inside the current selection propagates to the other selected
//! rows.

pub mod buffer;
pub mod delegate;
pub mod error;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod header;
pub mod selection;
pub mod style;
pub mod table;
pub mod text;

pub use buffer::{Buffer, Cell};
pub use delegate::CellDelegate;
pub use error::StyleError;
pub use event::{EventResult, GridEvent, Key, Modifiers, MouseButton};
pub use geometry::Rect;
pub use grid::{CheckCell, GridBackend, MemoryGrid, SortOrder};
pub use header::{CheckHeader, HeaderEvent, HeaderState};
pub use selection::{SelectionBehavior, SelectionMode, SelectionRange, SelectionState};
pub use style::{CellStyle, GridStyle, Rgb, TextAttrs};
pub use table::{CheckTable, TableId};
