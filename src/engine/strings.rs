//! String sub-machine: quote-close decisions, the embedded-quote and
//! unclosed-string lookaheads, and escape-sequence handling.

use super::{Engine, State};
use crate::classify::{is_ident_byte, is_quote, is_ws, smart_quote_at};

impl<'a> Engine<'a> {
    pub(super) fn string_step(&mut self) {
        let input = self.input;
        let b = input[self.pos];
        if b == b'\\' {
            self.state = State::InStringEscape;
            self.pos += 1;
            return;
        }
        if smart_quote_at(input, self.pos).is_some() {
            // typographic quotes always terminate
            self.pos += 3;
            self.close_string();
            return;
        }
        if b == b'"' && self.string_delim == b'\'' {
            // double quote inside a single-quoted string; the delimiter is
            // upgraded to `"` on close, so this one must be escaped
            self.out.extend_from_slice(b"\\\"");
            self.pos += 1;
            return;
        }
        if b == self.string_delim {
            if self.state_before_string == State::InObjectValue
                && self.embedded_quote_is_escape(self.pos)
            {
                self.log("escaped embedded quote");
                self.out.extend_from_slice(b"\\\"");
                self.pos += 1;
                return;
            }
            self.pos += 1;
            self.close_string();
            return;
        }
        if b == b'}' || b == b']' {
            if self.string_is_unclosed(b) {
                self.log("closed unclosed string");
                // leave the structural byte for the outer machine
                self.close_string();
                return;
            }
            self.out.push(b);
            self.pos += 1;
            return;
        }
        match b {
            b'\n' => self.out.extend_from_slice(b"\\n"),
            b'\r' => self.out.extend_from_slice(b"\\r"),
            b'\t' => self.out.extend_from_slice(b"\\t"),
            _ if b < 0x20 => {
                let hex = format!("\\u{:04X}", b);
                self.out.extend_from_slice(hex.as_bytes());
            }
            _ => self.out.push(b),
        }
        self.pos += 1;
    }

    pub(super) fn close_string(&mut self) {
        self.out.push(b'"');
        self.in_string = false;
        if self.state_before_string == State::InObjectKey {
            self.state = State::ExpectingColon;
        } else {
            self.state = State::ExpectingCommaOrEnd;
            self.current_key_start = None;
        }
    }

    /// Decide whether a quote inside an object-value string is embedded
    /// content (escape it) or actually terminates the string.
    fn embedded_quote_is_escape(&self, p: usize) -> bool {
        let input = self.input;
        let mut i = p + 1;
        while i < input.len() && is_ws(input[i]) {
            i += 1;
        }
        let Some(&c) = input.get(i) else {
            return false; // end of input: the quote closes
        };
        match c {
            b',' | b'}' | b']' | b':' => false,
            b'"' | b'\'' => !self.quote_starts_key(i),
            _ if c.is_ascii_alphabetic() || c == b'_' || c == b'.' => {
                let mut j = i;
                while j < input.len() {
                    let b = input[j];
                    if b == b':' {
                        // a lone identifier between the quote and the colon
                        // means a new key follows and the quote closed
                        let interstitial = &input[p + 1..j];
                        return interstitial.is_empty()
                            || !interstitial.iter().all(|&b| is_ident_byte(b));
                    }
                    if matches!(b, b',' | b'}' | b']') {
                        return true;
                    }
                    if is_quote(b) {
                        return !self.quote_starts_key(j);
                    }
                    j += 1;
                }
                false
            }
            _ => false,
        }
    }

    /// Does the quote at `i` open a `"key":` pair? Scan past its putative
    /// closing quote and optional whitespace, then check for `:`.
    pub(super) fn quote_starts_key(&self, i: usize) -> bool {
        let input = self.input;
        let q = input[i];
        let mut j = i + 1;
        while j < input.len() {
            let b = input[j];
            if b == b'\\' {
                j += 2;
                continue;
            }
            if b == q {
                let mut k = j + 1;
                while k < input.len() && is_ws(input[k]) {
                    k += 1;
                }
                return input.get(k) == Some(&b':');
            }
            j += 1;
        }
        false
    }

    /// At a `}` or `]` inside a string: the string is unclosed when no
    /// further matching delimiter occurs before the next occurrence of the
    /// same structural byte.
    fn string_is_unclosed(&self, structural: u8) -> bool {
        let input = self.input;
        let mut j = self.pos + 1;
        while j < input.len() {
            let b = input[j];
            if b == structural {
                return true;
            }
            if b == self.string_delim {
                return false;
            }
            j += 1;
        }
        true
    }

    /// One escape sequence; `pos` is at the byte following the backslash.
    pub(super) fn escape_step(&mut self) {
        let input = self.input;
        let b = input[self.pos];
        match b {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
                self.out.push(b'\\');
                self.out.push(b);
                self.pos += 1;
            }
            b'u' if self.pos + 5 <= input.len()
                && input[self.pos + 1..self.pos + 5]
                    .iter()
                    .all(|c| c.is_ascii_hexdigit()) =>
            {
                self.out.extend_from_slice(b"\\u");
                self.out
                    .extend_from_slice(&input[self.pos + 1..self.pos + 5]);
                self.pos += 5;
            }
            _ => {
                // unknown escape: keep the backslash as a literal
                self.out.extend_from_slice(b"\\\\");
                self.out.push(b);
                self.pos += 1;
            }
        }
        self.state = State::InString;
    }
}
