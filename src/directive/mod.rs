//! Directive comment scanning and replacement rendering.

mod scanner;
mod synthesize;

pub use scanner::{
    parse_environment_list, scan_directives, ExtractedDirective, Formatting, LineBreak,
    RequestedEnvironment, DIRECTIVE_KEYWORD,
};
pub use synthesize::{synthesize_comment, GLOBAL_KEYWORD};
