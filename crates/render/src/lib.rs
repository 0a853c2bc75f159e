//! # Context Render
//!
//! Syntax-aware excerpts: show the lines you care about plus just enough
//! of their enclosing scopes to read them in place.
//!
//! ```text
//!   3│class Greeter:
//! ...⋮...
//!   6│    def hello(self):
//! ...⋮...
//! ```

mod config;
mod error;
mod render;
mod tree_context;

pub use config::ContextConfig;
pub use error::{RenderError, Result};
pub use render::render_file;
pub use tree_context::{elision_marker, TreeContext};
