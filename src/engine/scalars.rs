//! Scalar handlers: number consumption, keyword normalisation, and unquoted
//! object-value strings (including truncated keywords at end of input).

use super::{Engine, State};
use crate::classify::{is_quote, is_ws};

const KEYWORDS: [(&str, &str); 4] = [
    ("true", "true"),
    ("false", "false"),
    ("null", "null"),
    ("none", "null"),
];

impl<'a> Engine<'a> {
    /// Consume one number token. The sign, integer part, fraction and
    /// exponent are copied as seen; an exponent marker with no digits and a
    /// dot with no fraction are rolled back from the output so the emitted
    /// token always parses.
    pub(super) fn number_step(&mut self) {
        let input = self.input;
        let start = self.out.len();
        match input.get(self.pos) {
            Some(&b'-') => {
                self.out.push(b'-');
                self.pos += 1;
            }
            Some(&b'+') => {
                // JSON has no unary plus; keep the digits only
                self.pos += 1;
            }
            _ => {}
        }
        while self.pos < input.len() && input[self.pos].is_ascii_digit() {
            self.out.push(input[self.pos]);
            self.pos += 1;
        }
        if input.get(self.pos) == Some(&b'.') {
            self.out.push(b'.');
            self.pos += 1;
            let mut fraction = 0usize;
            while self.pos < input.len() && input[self.pos].is_ascii_digit() {
                self.out.push(input[self.pos]);
                self.pos += 1;
                fraction += 1;
            }
            if fraction == 0 {
                self.out.pop();
            }
        }
        if matches!(input.get(self.pos), Some(&b'e') | Some(&b'E')) && self.out.len() > start {
            let mark = self.out.len();
            self.out.push(input[self.pos]);
            self.pos += 1;
            if matches!(input.get(self.pos), Some(&b'+') | Some(&b'-')) {
                self.out.push(input[self.pos]);
                self.pos += 1;
            }
            let mut digits = 0usize;
            while self.pos < input.len() && input[self.pos].is_ascii_digit() {
                self.out.push(input[self.pos]);
                self.pos += 1;
                digits += 1;
            }
            if digits == 0 {
                // incomplete exponent: the marker bytes stay consumed but
                // never reach the output
                self.out.truncate(mark);
            }
        }
        let emitted = &self.out[start..];
        if emitted.is_empty() || emitted == b"-" {
            // a bare sign is not a number; treat the slot as missing
            self.out.truncate(start);
            self.missing_value_if_pending();
        }
        self.state = State::ExpectingCommaOrEnd;
    }

    /// Normalise `true`/`false`/`null` and their Python spellings
    /// (case-insensitive, word-boundary suffix required).
    pub(super) fn try_keyword(&mut self) -> bool {
        let input = self.input;
        for (word, emit) in KEYWORDS {
            let end = self.pos + word.len();
            if end > input.len() {
                continue;
            }
            if !input[self.pos..end].eq_ignore_ascii_case(word.as_bytes()) {
                continue;
            }
            match input.get(end) {
                Some(&c) if c.is_ascii_alphanumeric() || c == b'_' => continue,
                _ => {}
            }
            if &input[self.pos..end] != emit.as_bytes() {
                self.log("normalised keyword");
            }
            self.out.extend_from_slice(emit.as_bytes());
            self.pos = end;
            self.state = State::ExpectingCommaOrEnd;
            return true;
        }
        false
    }

    /// An unquoted object value: collect up to a structural byte or quote,
    /// then decide between a truncated keyword, a value missing its
    /// trailing comma before the next key, and a plain promoted string.
    pub(super) fn unquoted_value(&mut self) {
        let input = self.input;
        let start = self.pos;
        while self.pos < input.len() {
            let b = input[self.pos];
            if matches!(b, b',' | b'}' | b']') || is_quote(b) {
                break;
            }
            self.pos += 1;
        }
        let mut end = self.pos;
        while end > start && is_ws(input[end - 1]) {
            end -= 1;
        }
        let text = &input[start..end];
        if is_truncated_keyword(text) && only_closers_remain(&input[self.pos..]) {
            if self.opts.omit_empty_values {
                self.log("removed key with missing value");
                self.remove_current_key();
            } else {
                self.log("added empty string for missing value");
                self.out.extend_from_slice(b"\"\"");
            }
            self.state = State::ExpectingCommaOrEnd;
            return;
        }
        let stop = input.get(self.pos).copied();
        if stop.is_some_and(is_quote) && self.quote_starts_key(self.pos) {
            self.emit_promoted_string(start, end);
            self.log("inserted missing comma");
            self.out.extend_from_slice(b", ");
            self.state = State::InObjectKey;
            return;
        }
        if !text.is_empty() {
            self.emit_promoted_string(start, end);
        }
        self.state = State::ExpectingCommaOrEnd;
    }

    /// Quote `input[start..end]` into the output, escaping `\` and `"`.
    fn emit_promoted_string(&mut self, start: usize, end: usize) {
        self.out.push(b'"');
        for &b in &self.input[start..end] {
            match b {
                b'"' => self.out.extend_from_slice(b"\\\""),
                b'\\' => self.out.extend_from_slice(b"\\\\"),
                _ => self.out.push(b),
            }
        }
        self.out.push(b'"');
    }
}

/// A case-folded proper prefix of `true`, `false` or `null`.
fn is_truncated_keyword(text: &[u8]) -> bool {
    if text.is_empty() {
        return false;
    }
    ["true", "false", "null"].iter().any(|word| {
        text.len() < word.len() && text.eq_ignore_ascii_case(&word.as_bytes()[..text.len()])
    })
}

fn only_closers_remain(rest: &[u8]) -> bool {
    rest.iter().all(|&b| is_ws(b) || b == b'}' || b == b']')
}
