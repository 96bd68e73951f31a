//! Document rewriting and position mapping.
//!
//! This module provides:
//! - `LineIndex` for byte offset <-> line/column conversion
//! - `DirectiveRegion` and `RegionTable` for mapping processed offsets back
//! - `rewrite` to substitute replacements into the original text
//! - `DocumentStore` for region tables awaiting postprocess

mod region;
mod rewrite;
mod state;
mod text;

pub use region::{DirectiveRegion, RegionTable};
pub use rewrite::rewrite;
pub use state::DocumentStore;
pub use text::{LineIndex, Location};
