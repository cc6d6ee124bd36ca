//! Pre-passes that normalise external noise before the engine runs:
//! markdown fence extraction, string/URL-aware comment stripping, and
//! extraction of the best valid balanced container from surrounding prose.

use memchr::{memchr, memchr2};

use crate::classify::is_ws;
use crate::engine::Logger;
use crate::options::Options;

pub(crate) fn sanitize(input: &str, opts: &Options, logger: &mut Logger) -> String {
    let fenced = if opts.fenced_code_blocks && input.contains("```") {
        extract_fenced(input)
    } else {
        None
    };
    let base = fenced.as_deref().unwrap_or(input);
    let stripped = strip_comments(base, logger);
    if serde_json::from_str::<serde_json::Value>(&stripped).is_ok() {
        return stripped;
    }
    match extract_candidate(&stripped) {
        Some(candidate) => candidate.to_string(),
        None => stripped,
    }
}

/// Concatenated interiors of all ```json fences, falling back to plain
/// ``` fences, or None when the input carries no complete fence.
fn extract_fenced(s: &str) -> Option<String> {
    let mut bodies = collect_fences(s, true);
    if bodies.is_empty() {
        bodies = collect_fences(s, false);
    }
    if bodies.is_empty() {
        return None;
    }
    Some(bodies.concat())
}

fn collect_fences(s: &str, json_only: bool) -> Vec<&str> {
    let mut bodies = Vec::new();
    let mut pos = 0usize;
    while let Some(rel) = s[pos..].find("```") {
        let after_ticks = pos + rel + 3;
        let rest = s[after_ticks..].as_bytes();
        let mut i = 0usize;
        // tolerate fences like ```` with extra backticks
        while i < rest.len() && rest[i] == b'`' {
            i += 1;
        }
        let lang_start = i;
        while i < rest.len() && (rest[i].is_ascii_alphanumeric() || rest[i] == b'_') {
            i += 1;
        }
        let lang = &s[after_ticks + lang_start..after_ticks + i];
        while i < rest.len() && (rest[i] == b' ' || rest[i] == b'\t') {
            i += 1;
        }
        if rest[i..].starts_with(b"\r\n") {
            i += 2;
        } else if i < rest.len() && (rest[i] == b'\n' || rest[i] == b'\r') {
            i += 1;
        }
        let body_start = after_ticks + i;
        let Some(end_rel) = s[body_start..].find("```") else {
            break;
        };
        let body_end = body_start + end_rel;
        if !json_only || lang.eq_ignore_ascii_case("json") {
            bodies.push(&s[body_start..body_end]);
        }
        pos = body_end + 3;
    }
    bodies
}

/// Remove `//` line comments and `/* */` block comments, leaving string
/// literals (single- or double-quoted) and `scheme://` URLs untouched.
/// A single space bridges the removed span when both neighbours are
/// non-whitespace; one space is dropped when both neighbours are spaces.
pub(crate) fn strip_comments(s: &str, logger: &mut Logger) -> String {
    let bytes = s.as_bytes();
    if memchr(b'/', bytes).is_none() {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut run_start = 0usize;
    let mut i = 0usize;
    let mut in_string = false;
    let mut delim = 0u8;
    let mut escaped = false;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == delim {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' | b'\'' => {
                in_string = true;
                delim = b;
                escaped = false;
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') && !is_url_slashes(bytes, i) => {
                out.push_str(&s[run_start..i]);
                logger.log("removed line comment", i, bytes);
                let end = match memchr2(b'\n', b'\r', &bytes[i + 2..]) {
                    Some(p) => i + 2 + p, // the newline itself stays
                    None => bytes.len(),
                };
                i = bridge_seam(&mut out, bytes, end);
                run_start = i;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&s[run_start..i]);
                logger.log("removed block comment", i, bytes);
                let end = find_block_end(bytes, i + 2);
                i = bridge_seam(&mut out, bytes, end);
                run_start = i;
            }
            _ => i += 1,
        }
    }
    out.push_str(&s[run_start..]);
    out
}

/// End of a `/* */` comment whose body starts at `from`: one past the
/// closing `*/`, or end of input when unterminated.
fn find_block_end(bytes: &[u8], from: usize) -> usize {
    let mut off = from;
    while let Some(p) = memchr(b'*', &bytes[off..]) {
        let idx = off + p;
        if bytes.get(idx + 1) == Some(&b'/') {
            return idx + 2;
        }
        off = idx + 1;
    }
    bytes.len()
}

/// Apply the seam-spacing rule after removing a comment span ending at
/// `end` (exclusive). Returns the resume index.
fn bridge_seam(out: &mut String, bytes: &[u8], end: usize) -> usize {
    let before = out.as_bytes().last().copied();
    let after = bytes.get(end).copied();
    match (before, after) {
        (Some(b), Some(a)) if !is_ws(b) && !is_ws(a) => {
            out.push(' ');
            end
        }
        (Some(b' '), Some(b' ')) => end + 1,
        _ => end,
    }
}

/// True when the `//` at `i` is the tail of a URL scheme: the preceding
/// byte is `:` and at least two alphabetic bytes run up to it.
fn is_url_slashes(bytes: &[u8], i: usize) -> bool {
    if i == 0 || bytes[i - 1] != b':' {
        return false;
    }
    let mut j = i - 1;
    let mut run = 0usize;
    while j > 0 && bytes[j - 1].is_ascii_alphabetic() {
        j -= 1;
        run += 1;
    }
    run >= 2
}

/// Best valid balanced container inside otherwise-invalid text: the largest
/// `{ ... }` substring that parses (longest wins on ties), else the first
/// `[ ... ]` substring that parses.
pub(crate) fn extract_candidate(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut best: Option<&str> = None;
    for start in container_starts(bytes, b'{') {
        if let Some(end) = match_balanced(bytes, start) {
            let candidate = &s[start..=end];
            if best.is_some_and(|b| b.len() >= candidate.len()) {
                continue;
            }
            if serde_json::from_str::<serde_json::Value>(candidate).is_ok() {
                best = Some(candidate);
            }
        }
    }
    if best.is_some() {
        return best;
    }
    for start in container_starts(bytes, b'[') {
        if let Some(end) = match_balanced(bytes, start) {
            let candidate = &s[start..=end];
            if serde_json::from_str::<serde_json::Value>(candidate).is_ok() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Positions of `target` outside string literals.
fn container_starts(bytes: &[u8], target: u8) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut in_string = false;
    let mut delim = 0u8;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == delim {
                in_string = false;
            }
            continue;
        }
        if b == b'"' || b == b'\'' {
            in_string = true;
            delim = b;
            escaped = false;
        } else if b == target {
            starts.push(i);
        }
    }
    starts
}

/// Index of the closer balancing the opener at `start`, ignoring openers and
/// closers inside string literals. A backslash suspends quote matching for
/// one byte.
fn match_balanced(bytes: &[u8], start: usize) -> Option<usize> {
    let open = bytes[start];
    let close = if open == b'{' { b'}' } else { b']' };
    let mut depth = 0usize;
    let mut in_string = false;
    let mut delim = 0u8;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == delim {
                in_string = false;
            }
            continue;
        }
        if b == b'"' || b == b'\'' {
            in_string = true;
            delim = b;
            escaped = false;
        } else if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}
