//! Checkbox-column table widget.
//!
//! [`CheckTable`] wraps a [`GridBackend`](crate::grid::GridBackend) and
//! reserves the backend's physical column 0 for per-row checkboxes. Every
//! column-indexed operation on the public API is remapped by one, so callers
//! address a grid that looks checkbox-free; the header overlays a select-all
//! checkbox on the reserved section and mirrors the aggregate row state.

mod events;
mod render;
mod state;

pub use state::{CheckTable, TableId};
