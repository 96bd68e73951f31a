//! Rendering of replacement `global` comments.

use crate::environments::Globals;

use super::scanner::Formatting;

/// Keyword of the comment that replaces a directive.
pub const GLOBAL_KEYWORD: &str = "global";

/// Render a `global` comment declaring `globals`, laid out like the directive
/// it replaces.
///
/// Multi-line directives put the keyword, each global and the justification on
/// lines of their own, using the directive's own line-break sequence.
pub fn synthesize_comment(globals: &Globals, formatting: &Formatting) -> String {
    let mut items = vec![GLOBAL_KEYWORD.to_string()];
    items.extend(globals.iter().map(|(name, writability)| match writability.suffix() {
        Some(suffix) => format!("{}:{}", name, suffix),
        None => name.clone(),
    }));
    if let Some(justification) = &formatting.justification {
        items.push(justification.clone());
    }

    match formatting.line_break {
        Some(line_break) => {
            let br = line_break.as_str();
            format!("/*{br}{}{br}*/", items.join(br))
        }
        None => {
            let leading = if formatting.leading_space { " " } else { "" };
            let trailing = if formatting.trailing_space { " " } else { "" };
            format!("/*{leading}{}{trailing}*/", items.join(" "))
        }
    }
}
