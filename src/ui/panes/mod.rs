//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting, error line and selected line
//! - [`tokens`]: The full token trace with the selected token marked
//! - [`tree`]: The syntax tree, or the parse error when there is none
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a stateless `render_*` function; scroll offsets
//! live in [`App`](crate::ui::App) and are clamped during rendering.

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::render_tree_pane;
