//! Compilation of substitution patterns.
//!
//! Substitution patterns label their groups with decimal indices, Go style:
//! `(?P<1>...)`. The `regex` crate only accepts capture names that start with
//! a letter or underscore, so numeric labels are renamed to internal names
//! before compilation and mapped back when the labels are read. Go's `.` also
//! matches a byte of invalid UTF-8, which the rewrite reproduces.

use crate::sub::errors::SubstituteError;
use regex::bytes::Regex;
use std::collections::HashMap;
use std::fmt;

const INTERNAL_PREFIX: &str = "goblin_group_";

/// A compiled substitution pattern.
#[derive(Clone)]
pub struct Pattern {
    expression: String,
    regex: Regex,
    /// User-visible label per capture group, in declaration order.
    labels: Vec<Option<String>>,
}

impl Pattern {
    /// Compile an expression, accepting numeric group names.
    pub fn new(expression: &str) -> Result<Self, SubstituteError> {
        let (rewritten, renames) = rewrite_expression(expression);
        let regex = Regex::new(&rewritten)?;

        // capture_names() enumerates groups by opening parenthesis, which is
        // the declaration order the engine walks in.
        let labels = regex
            .capture_names()
            .skip(1)
            .map(|name| {
                name.map(|name| {
                    renames
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| name.to_string())
                })
            })
            .collect();

        Ok(Self {
            expression: expression.to_string(),
            regex,
            labels,
        })
    }

    /// The expression as the caller wrote it.
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Labels of every capture group in declaration order (`None` = unnamed).
    pub fn labels(&self) -> &[Option<String>] {
        &self.labels
    }

    pub fn group_count(&self) -> usize {
        self.labels.len()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("expression", &self.expression)
            .field("labels", &self.labels)
            .finish()
    }
}

/// Matches one character like Go's `.`: any valid UTF-8 character, or a
/// single byte of invalid UTF-8 (Go decodes those as U+FFFD).
const ANY_CHAR: &str = r"(?:.|(?-u:[\x80-\xff]))";

/// Rewrite a Go-flavoured expression into one the `regex` crate accepts with
/// the same meaning:
///
/// - every `(?P<label>` / `(?<label>` opener whose label starts with a digit
///   is renamed to an internal name,
/// - every bare `.` is widened to also match bytes of invalid UTF-8.
///
/// Escapes, character classes and `(?x)` comments are copied verbatim.
/// Returns the rewritten expression and a map from internal name to the
/// original label. Each occurrence gets its own internal name, so a label may
/// be reused by several groups.
fn rewrite_expression(expression: &str) -> (String, HashMap<String, String>) {
    let mut out = String::with_capacity(expression.len() + 16);
    let mut renames = HashMap::new();
    let mut class_depth = 0usize;
    // `x` flag in effect, and the value to restore when each open group closes
    let mut verbose = false;
    let mut scopes: Vec<bool> = Vec::new();
    let mut rest = expression;

    while let Some(c) = rest.chars().next() {
        if c == '\\' {
            let end = rest[1..]
                .chars()
                .next()
                .map_or(rest.len(), |escaped| 1 + escaped.len_utf8());
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        if class_depth > 0 {
            match c {
                '[' => class_depth += 1,
                ']' => class_depth -= 1,
                _ => {}
            }
            out.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        match c {
            '[' => {
                class_depth = 1;
                out.push('[');
                rest = &rest[1..];
                if let Some(after) = rest.strip_prefix('^') {
                    out.push('^');
                    rest = after;
                }
                // A leading ']' is a literal member, not the end of the class.
                if let Some(after) = rest.strip_prefix(']') {
                    out.push(']');
                    rest = after;
                }
            }
            '#' if verbose => {
                let end = rest.find('\n').map_or(rest.len(), |newline| newline + 1);
                out.push_str(&rest[..end]);
                rest = &rest[end..];
            }
            '.' => {
                out.push_str(ANY_CHAR);
                rest = &rest[1..];
            }
            '(' => {
                if let Some((opener_len, label)) = digit_group_opener(rest) {
                    let internal = format!("{INTERNAL_PREFIX}{}_{label}", renames.len());
                    out.push_str("(?P<");
                    out.push_str(&internal);
                    out.push('>');
                    renames.insert(internal, label.to_string());
                    scopes.push(verbose);
                    rest = &rest[opener_len..];
                } else if let Some((flags_len, flags, scoped)) = flag_group(rest) {
                    if scoped {
                        scopes.push(verbose);
                    }
                    verbose = apply_verbose_flag(flags, verbose);
                    out.push_str(&rest[..flags_len]);
                    rest = &rest[flags_len..];
                } else {
                    scopes.push(verbose);
                    out.push('(');
                    rest = &rest[1..];
                }
            }
            ')' => {
                verbose = scopes.pop().unwrap_or(verbose);
                out.push(')');
                rest = &rest[1..];
            }
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    (out, renames)
}

/// Recognise a group opener whose name starts with a digit, at the start of
/// `input`.
///
/// Any `[0-9][A-Za-z0-9_]*` label qualifies, so `1a` compiles and is later
/// reported as a label that is not an integer. Returns the byte length of the
/// whole opener (through `>`) and the label.
fn digit_group_opener(input: &str) -> Option<(usize, &str)> {
    let head_len = if input.starts_with("(?P<") {
        4
    } else if input.starts_with("(?<") {
        3
    } else {
        return None;
    };

    let after = &input[head_len..];
    let close = after.find('>')?;
    let label = &after[..close];
    let mut bytes = label.bytes();
    let starts_with_digit = bytes.next().is_some_and(|b| b.is_ascii_digit());
    if !starts_with_digit || !bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }

    Some((head_len + close + 1, label))
}

/// Recognise `(?flags)` or `(?flags:` at the start of `input`.
///
/// Returns the opener length, the flag letters, and whether it opens a group
/// (`:` form) rather than changing flags for the rest of the current group.
fn flag_group(input: &str) -> Option<(usize, &str, bool)> {
    let after = input.strip_prefix("(?")?;
    let flags_end = after
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '-'))
        .unwrap_or(after.len());
    let flags = &after[..flags_end];
    match after[flags_end..].chars().next() {
        Some(')') => Some((2 + flags_end + 1, flags, false)),
        Some(':') => Some((2 + flags_end + 1, flags, true)),
        _ => None,
    }
}

fn apply_verbose_flag(flags: &str, mut verbose: bool) -> bool {
    let mut negated = false;
    for c in flags.chars() {
        match c {
            '-' => negated = true,
            'x' => verbose = !negated,
            _ => {}
        }
    }
    verbose
}
