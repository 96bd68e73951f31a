//! Lexical scanner for `eslint-env` directive comments.
//!
//! Directive comments are located with regular expressions over the raw text;
//! the host language is never parsed.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Keyword that opens a directive comment.
pub const DIRECTIVE_KEYWORD: &str = "eslint-env";

/// `/*`, optional whitespace, the keyword, then an optional body that must
/// start with whitespace, up to the first `*/`.
static DIRECTIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*(\s*)eslint-env(\s.*?)?\*/").unwrap());

/// Separator between the directive body and its justification.
static JUSTIFICATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s-{2,}\s").unwrap());

/// Whitespace around `:` in `name : value` entries.
static ENTRY_COLON_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*:\s*").unwrap());

/// Entry separators: commas and whitespace.
static ENTRY_SEPARATOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").unwrap());

/// Line-break sequence used by a multi-line directive comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreak {
    CrLf,
    Lf,
    Cr,
    LineSeparator,
    ParagraphSeparator,
}

impl LineBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::LineSeparator => "\u{2028}",
            Self::ParagraphSeparator => "\u{2029}",
        }
    }

    /// Find the first line break in `text`.
    pub fn find(text: &str) -> Option<Self> {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' if chars.peek() == Some(&'\n') => return Some(Self::CrLf),
                '\r' => return Some(Self::Cr),
                '\n' => return Some(Self::Lf),
                '\u{2028}' => return Some(Self::LineSeparator),
                '\u{2029}' => return Some(Self::ParagraphSeparator),
                _ => {}
            }
        }
        None
    }
}

/// Layout of a directive comment, preserved by the replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatting {
    /// Whitespace follows the opening `/*`.
    pub leading_space: bool,
    /// Whitespace precedes the closing `*/`.
    pub trailing_space: bool,
    /// Set when the comment spans lines; the replacement is then rendered one
    /// item per line with this sequence.
    pub line_break: Option<LineBreak>,
    /// Free text after the `--` separator, starting at the dashes.
    pub justification: Option<String>,
}

impl Formatting {
    pub fn is_multiline(&self) -> bool {
        self.line_break.is_some()
    }
}

/// One entry of a directive's environment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedEnvironment {
    pub name: String,
    pub enabled: bool,
}

/// A directive comment found in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDirective {
    /// Byte range of the whole comment, delimiters included.
    pub range: Range<usize>,
    /// Requested environments in order of first appearance.
    pub requested: Vec<RequestedEnvironment>,
    pub formatting: Formatting,
}

impl ExtractedDirective {
    /// Names of the environments that are switched on.
    pub fn enabled_environments(&self) -> impl Iterator<Item = &str> {
        self.requested
            .iter()
            .filter(|env| env.enabled)
            .map(|env| env.name.as_str())
    }
}

/// Extract all directive comments from `source`, in order of appearance.
pub fn scan_directives(source: &str) -> Vec<ExtractedDirective> {
    DIRECTIVE_PATTERN
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let leading = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());

            let (list, justification) = split_justification(body);
            let formatting = Formatting {
                leading_space: !leading.is_empty(),
                trailing_space: body.ends_with(char::is_whitespace),
                line_break: LineBreak::find(whole.as_str()),
                justification,
            };

            Some(ExtractedDirective {
                range: whole.range(),
                requested: parse_environment_list(list),
                formatting,
            })
        })
        .collect()
}

/// Split a directive body into its environment list and justification.
fn split_justification(body: &str) -> (&str, Option<String>) {
    match JUSTIFICATION_PATTERN.find(body) {
        Some(sep) => {
            let justification = body[sep.start()..].trim();
            (&body[..sep.start()], Some(justification.to_string()))
        }
        None => (body, None),
    }
}

/// Parse `name`, `name:true` or `name:false` entries separated by commas or
/// whitespace. Repeated names keep their first position and their last flag.
pub fn parse_environment_list(list: &str) -> Vec<RequestedEnvironment> {
    let normalized = ENTRY_COLON_PATTERN.replace_all(list.trim(), ":");
    let mut requested: Vec<RequestedEnvironment> = Vec::new();

    for token in ENTRY_SEPARATOR_PATTERN.split(&normalized) {
        let token = strip_quotes(token);
        let (name, enabled) = match token.split_once(':') {
            Some((name, value)) => (strip_quotes(name), strip_quotes(value) == "true"),
            None => (token, true),
        };
        if name.is_empty() {
            continue;
        }

        match requested.iter_mut().find(|env| env.name == name) {
            Some(existing) => existing.enabled = enabled,
            None => requested.push(RequestedEnvironment {
                name: name.to_string(),
                enabled,
            }),
        }
    }

    requested
}

fn strip_quotes(token: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = token
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    token
}
