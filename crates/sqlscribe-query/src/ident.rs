//! Identifier micro-grammar.
//!
//! Identifiers accepted at the builder boundary follow a small grammar:
//! `table[.column]`, optionally wrapped in function calls and operators
//! (`SUM(users.balance) + 1`), optionally ending in an `AS alias` clause.
//! This module is a character-level scanner for that grammar; the compiler
//! decides what each recognized piece means.

/// Split `base AS alias` at the first top-level ` AS ` (case-insensitive).
///
/// An ` AS ` inside parentheses belongs to a function argument and is not a
/// split point. Returns `None` when the input carries no alias clause.
pub fn split_alias(input: &str) -> Option<(String, String)> {
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b' ' if depth == 0 && i + 4 <= bytes.len() => {
                if bytes[i..i + 4].eq_ignore_ascii_case(b" as ") {
                    let base = input[..i].trim();
                    let alias = input[i + 4..].trim();
                    if !base.is_empty() && !alias.is_empty() {
                        return Some((base.to_string(), alias.to_string()));
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Rewrite an expression, quoting every name it contains.
///
/// A name starts with a letter and continues with alphanumerics,
/// underscores and dots. A name immediately followed by `(` is a function
/// name and passes through untouched; every other name is replaced by
/// whatever the callback returns. All remaining characters (operators,
/// commas, digits, the `*` wildcard) are copied verbatim.
pub fn scan_expression<F>(input: &str, mut quote: F) -> String
where
    F: FnMut(&str) -> String,
{
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len() + 8);
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len()
                && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.')
            {
                i += 1;
            }
            let name = &input[start..i];
            if i < bytes.len() && bytes[i] == b'(' {
                // Function name, keep as written.
                out.push_str(name);
                out.push('(');
                i += 1;
            } else {
                out.push_str(&quote(name));
            }
        } else {
            // Non-name bytes are copied through; multi-byte characters can
            // only appear here and are never part of a name.
            let ch = input[i..].chars().next().unwrap_or('\0');
            out.push(ch);
            i += ch.len_utf8();
        }
    }
    out
}

/// Split a comma-separated identifier list on top-level commas.
///
/// Commas inside parentheses belong to function arguments and do not
/// split. Entries are trimmed; empty entries are dropped.
pub fn split_list(input: &str) -> Vec<String> {
    let bytes = input.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                let piece = input[start..i].trim();
                if !piece.is_empty() {
                    parts.push(piece.to_string());
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    let piece = input[start..].trim();
    if !piece.is_empty() {
        parts.push(piece.to_string());
    }
    parts
}
