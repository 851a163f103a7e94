//! Dialect-aware splitting of SQL scripts into statements
//!
//! A single left-to-right pass over the script bytes tracks whether the
//! cursor is inside a string, quoted identifier, comment or dollar-quoted
//! body. Only a semicolon seen outside all of those ends a statement.
//!
//! Malformed input is never an error: an unterminated quote or comment runs
//! to the end of the script and lands in the final statement.

use crate::dialect::{Dialect, DialectConfig};

/// A statement located in its source script
///
/// `start..end` is the byte range of the trimmed statement text, excluding
/// the terminating semicolon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

impl StatementSpan<'_> {
    /// Whether a byte offset falls inside the statement or directly after it
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Inside `'..'`, `".."`, `` `..` `` or `[..]`; `close` ends the region
    Quoted { close: u8, backslash: bool },
    LineComment,
    BlockComment { depth: usize },
    /// Inside `$tag$ .. $tag$`; the opener occupies `tag_start..tag_start + tag_len`
    DollarQuoted { tag_start: usize, tag_len: usize },
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Length of a `$tag$` opener starting at `start`, if there is one
///
/// The tag is empty or word characters and may not start with a digit, so
/// positional parameters such as `$1` are not openers. A `$` glued to a
/// preceding word character belongs to an identifier.
fn dollar_tag_len(bytes: &[u8], start: usize) -> Option<usize> {
    if start > 0 && is_word_byte(bytes[start - 1]) {
        return None;
    }
    let mut end = start + 1;
    if bytes.get(end).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    while end < bytes.len() && is_word_byte(bytes[end]) {
        end += 1;
    }
    (bytes.get(end) == Some(&b'$')).then_some(end - start + 1)
}

fn push_trimmed<'a>(
    script: &'a str,
    start: usize,
    end: usize,
    spans: &mut Vec<StatementSpan<'a>>,
) {
    let raw = &script[start..end];
    let without_lead = raw.trim_start();
    let text = without_lead.trim_end();
    if text.is_empty() {
        return;
    }
    let start = start + (raw.len() - without_lead.len());
    spans.push(StatementSpan {
        start,
        end: start + text.len(),
        text,
    });
}

fn scan<'a>(script: &'a str, config: &DialectConfig) -> Vec<StatementSpan<'a>> {
    let bytes = script.as_bytes();
    let mut spans = Vec::new();
    let mut state = ScanState::Normal;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        match state {
            ScanState::Normal => match b {
                b';' => {
                    push_trimmed(script, start, i, &mut spans);
                    start = i + 1;
                    i += 1;
                }
                b'\'' | b'"' => {
                    state = ScanState::Quoted {
                        close: b,
                        backslash: config.backslash_escape,
                    };
                    i += 1;
                }
                b'`' if config.backtick_identifiers => {
                    state = ScanState::Quoted {
                        close: b'`',
                        backslash: config.backslash_escape,
                    };
                    i += 1;
                }
                b'[' if config.bracket_identifiers => {
                    state = ScanState::Quoted {
                        close: b']',
                        backslash: config.backslash_escape,
                    };
                    i += 1;
                }
                b'-' if next == Some(b'-') => {
                    state = ScanState::LineComment;
                    i += 2;
                }
                b'#' if config.hash_line_comment => {
                    state = ScanState::LineComment;
                    i += 1;
                }
                b'/' if next == Some(b'*') => {
                    state = ScanState::BlockComment { depth: 1 };
                    i += 2;
                }
                b'$' if config.dollar_quotes => match dollar_tag_len(bytes, i) {
                    Some(tag_len) => {
                        state = ScanState::DollarQuoted { tag_start: i, tag_len };
                        i += tag_len;
                    }
                    None => i += 1,
                },
                _ => i += 1,
            },
            ScanState::Quoted { close, backslash } => {
                if backslash && b == b'\\' {
                    i += 2;
                } else if b == close {
                    if next == Some(close) {
                        i += 2;
                    } else {
                        state = ScanState::Normal;
                        i += 1;
                    }
                } else {
                    i += 1;
                }
            }
            ScanState::LineComment => {
                if b == b'\n' {
                    state = ScanState::Normal;
                }
                i += 1;
            }
            ScanState::BlockComment { depth } => {
                if b == b'*' && next == Some(b'/') {
                    state = if depth == 1 {
                        ScanState::Normal
                    } else {
                        ScanState::BlockComment { depth: depth - 1 }
                    };
                    i += 2;
                } else if config.nested_block_comments && b == b'/' && next == Some(b'*') {
                    state = ScanState::BlockComment { depth: depth + 1 };
                    i += 2;
                } else {
                    i += 1;
                }
            }
            ScanState::DollarQuoted { tag_start, tag_len } => {
                let tag = &bytes[tag_start..tag_start + tag_len];
                if b == b'$' && bytes[i..].starts_with(tag) {
                    state = ScanState::Normal;
                    i += tag_len;
                } else {
                    i += 1;
                }
            }
        }
    }

    if !matches!(state, ScanState::Normal | ScanState::LineComment) {
        tracing::debug!(
            state = ?state,
            offset = start,
            "Script ends inside an unterminated region; keeping it in the final statement"
        );
    }

    push_trimmed(script, start, bytes.len(), &mut spans);
    spans
}

/// Split a script into its top-level statements
///
/// Statements are trimmed and returned in source order; empty statements
/// (`;;`) are dropped. A script without semicolons yields one statement.
///
/// # Example
/// ```
/// use sql_edit_core::{Dialect, split_statements};
///
/// let statements = split_statements("SELECT 1;;; SELECT 2", Dialect::Postgresql);
/// assert_eq!(statements, vec!["SELECT 1", "SELECT 2"]);
/// ```
pub fn split_statements(script: &str, dialect: Dialect) -> Vec<String> {
    StatementSplitter::new(dialect).split(script)
}

/// Split a script and keep each statement's byte range in the script
pub fn split_statement_spans(script: &str, dialect: Dialect) -> Vec<StatementSpan<'_>> {
    StatementSplitter::new(dialect).spans(script)
}

/// Statement under a cursor positioned at byte `offset`
///
/// Returns the statement containing the offset (its end counts as inside),
/// otherwise the closest statement before it, otherwise `None`.
pub fn statement_at_offset(
    script: &str,
    dialect: Dialect,
    offset: usize,
) -> Option<StatementSpan<'_>> {
    let spans = split_statement_spans(script, dialect);
    spans
        .iter()
        .find(|span| span.contains(offset))
        .or_else(|| spans.iter().rev().find(|span| span.end <= offset))
        .copied()
}

/// A statement splitter bound to one dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementSplitter {
    dialect: Dialect,
}

impl StatementSplitter {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn split(&self, script: &str) -> Vec<String> {
        self.spans(script)
            .into_iter()
            .map(|span| span.text.to_string())
            .collect()
    }

    pub fn spans<'a>(&self, script: &'a str) -> Vec<StatementSpan<'a>> {
        scan(script, self.dialect.parser_config())
    }
}

/// A splitting function with the dialect fixed up front
pub fn create_statement_splitter(dialect: Dialect) -> impl Fn(&str) -> Vec<String> {
    let splitter = StatementSplitter::new(dialect);
    move |script: &str| splitter.split(script)
}
