//! Single-pass repair engine: a byte-addressed state machine that consumes
//! the sanitised input left-to-right and emits canonical JSON into an
//! append-only output buffer. Emitted output is never rescanned except to
//! strip a trailing comma before a closer, roll back an incomplete exponent
//! tail, or delete the most recent key via its recorded start offset.

mod scalars;
mod strings;

use crate::classify::{is_key_byte, is_ws, smart_quote_at, trim_end_ws};
use crate::options::Options;
use crate::repair::RepairLogEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Start,
    InObjectKey,
    InObjectValue,
    InArray,
    InString,
    InStringEscape,
    InNumber,
    ExpectingColon,
    ExpectingCommaOrEnd,
}

pub(crate) struct Logger {
    enable: bool,
    window: usize,
    entries: Vec<RepairLogEntry>,
}

impl Logger {
    pub(crate) fn new(enable: bool, window: usize) -> Self {
        Self {
            enable,
            window,
            entries: Vec::new(),
        }
    }

    /// Record a repair decision with a symmetric context snippet around
    /// `position`, marked with `>>>` at the offset.
    pub(crate) fn log(&mut self, message: &'static str, position: usize, input: &[u8]) {
        if !self.enable {
            return;
        }
        let pos = position.min(input.len());
        let start = pos.saturating_sub(self.window);
        let end = (pos + self.window).min(input.len());
        let mut context = String::with_capacity(end - start + 3);
        context.push_str(&String::from_utf8_lossy(&input[start..pos]));
        context.push_str(">>>");
        context.push_str(&String::from_utf8_lossy(&input[pos..end]));
        self.entries.push(RepairLogEntry {
            position,
            message,
            context,
        });
    }

    pub(crate) fn into_entries(self) -> Vec<RepairLogEntry> {
        self.entries
    }
}

pub(crate) struct Engine<'a> {
    input: &'a [u8],
    pos: usize,
    out: Vec<u8>,
    state: State,
    /// Expected closers for every container currently open in `out`.
    stack: Vec<u8>,
    in_string: bool,
    string_delim: u8,
    state_before_string: State,
    /// Offset in `out` of the opening `"` of the most recently emitted key.
    current_key_start: Option<usize>,
    opts: &'a Options,
    logger: &'a mut Logger,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(input: &'a [u8], opts: &'a Options, logger: &'a mut Logger) -> Self {
        Self {
            input,
            pos: 0,
            out: Vec::with_capacity(input.len().saturating_add(8)),
            state: State::Start,
            stack: Vec::new(),
            in_string: false,
            string_delim: b'"',
            state_before_string: State::InObjectValue,
            current_key_start: None,
            opts,
            logger,
        }
    }

    pub(crate) fn run(mut self) -> Vec<u8> {
        while self.pos < self.input.len() {
            match self.state {
                State::InStringEscape => self.escape_step(),
                State::InString => self.string_step(),
                _ => {
                    let b = self.input[self.pos];
                    if is_ws(b) {
                        self.pos += 1;
                        continue;
                    }
                    match self.state {
                        State::Start => self.start_step(b),
                        State::InObjectKey => self.object_key_step(b),
                        State::ExpectingColon => self.expecting_colon_step(b),
                        State::InObjectValue => self.object_value_step(b),
                        State::InArray => self.array_step(b),
                        State::ExpectingCommaOrEnd => self.comma_or_end_step(b),
                        State::InNumber => self.number_step(),
                        State::InString | State::InStringEscape => unreachable!(),
                    }
                }
            }
        }
        self.finish();
        self.out
    }

    fn log(&mut self, message: &'static str) {
        self.logger.log(message, self.pos, self.input);
    }

    fn start_step(&mut self, b: u8) {
        match b {
            b'{' => {
                self.out.push(b'{');
                self.stack.push(b'}');
                self.state = State::InObjectKey;
                self.pos += 1;
            }
            b'[' => {
                self.out.push(b'[');
                self.stack.push(b']');
                self.state = State::InArray;
                self.pos += 1;
            }
            _ => self.pos += 1,
        }
    }

    fn object_key_step(&mut self, b: u8) {
        match b {
            b'}' => {
                self.pos += 1;
                self.close_container(b'}');
            }
            b'"' | b'\'' => {
                if self.doubled_quote_key(b) {
                    return;
                }
                self.open_string(b, 1, State::InObjectKey);
            }
            _ => {
                if smart_quote_at(self.input, self.pos).is_some() {
                    // typographic quotes always open a double-quoted key
                    self.open_string(b'"', 3, State::InObjectKey);
                } else if is_key_byte(b) {
                    self.unquoted_key();
                } else {
                    self.pos += 1;
                }
            }
        }
    }

    /// A quote immediately doubled and followed by key-looking content is a
    /// typographic delimiter: emit one `"`, copy the key up to the matching
    /// delimiter, and expect a colon.
    fn doubled_quote_key(&mut self, q: u8) -> bool {
        if self.input.get(self.pos + 1) != Some(&q) {
            return false;
        }
        match self.input.get(self.pos + 2) {
            Some(&c) if c.is_ascii_alphanumeric() || c == b'_' || c == b' ' => {}
            _ => return false,
        }
        self.current_key_start = Some(self.out.len());
        self.out.push(b'"');
        self.pos += 2;
        while self.pos < self.input.len() {
            let b = self.input[self.pos];
            if b == q && self.input.get(self.pos + 1) == Some(&q) {
                self.pos += 2;
                break;
            }
            if b == q && self.input.get(self.pos + 1) == Some(&b':') {
                self.pos += 1;
                break;
            }
            if b == b':' || b == b'}' {
                break;
            }
            match b {
                b'"' => self.out.extend_from_slice(b"\\\""),
                b'\\' => self.out.extend_from_slice(b"\\\\"),
                _ => self.out.push(b),
            }
            self.pos += 1;
        }
        self.out.push(b'"');
        self.state = State::ExpectingColon;
        true
    }

    fn unquoted_key(&mut self) {
        self.current_key_start = Some(self.out.len());
        self.out.push(b'"');
        while self.pos < self.input.len() && is_key_byte(self.input[self.pos]) {
            self.out.push(self.input[self.pos]);
            self.pos += 1;
        }
        self.out.push(b'"');
        self.state = State::ExpectingColon;
    }

    fn expecting_colon_step(&mut self, b: u8) {
        if b == b':' {
            self.out.push(b':');
            self.pos += 1;
            self.preserve_spaces();
        } else {
            self.log("inserted missing colon");
            self.out.push(b':');
        }
        self.state = State::InObjectValue;
    }

    fn object_value_step(&mut self, b: u8) {
        match b {
            b'{' => {
                self.out.push(b'{');
                self.stack.push(b'}');
                self.state = State::InObjectKey;
                self.pos += 1;
            }
            b'[' => {
                self.out.push(b'[');
                self.stack.push(b']');
                self.state = State::InArray;
                self.pos += 1;
            }
            b'"' => {
                // A doubled quote directly before ordinary content is a stray
                // delimiter: drop the first, let the second open the string.
                if self.input.get(self.pos + 1) == Some(&b'"') {
                    if let Some(&x) = self.input.get(self.pos + 2) {
                        if x != b'"' && x != b'}' && x != b',' {
                            self.pos += 1;
                        }
                    }
                }
                self.open_string(b'"', 1, State::InObjectValue);
            }
            b'\'' => self.open_string(b'\'', 1, State::InObjectValue),
            b'}' => {
                self.missing_value_if_pending();
                self.pos += 1;
                self.close_container(b'}');
            }
            b',' => {
                self.missing_value_if_pending();
                self.state = State::ExpectingCommaOrEnd;
            }
            b'-' | b'+' => self.state = State::InNumber,
            _ if b.is_ascii_digit() => self.state = State::InNumber,
            _ => {
                if let Some(delim) = smart_quote_at(self.input, self.pos) {
                    self.open_string(delim, 3, State::InObjectValue);
                } else if b.is_ascii_alphabetic() || b == b'_' {
                    if !self.try_keyword() {
                        self.unquoted_value();
                    }
                } else {
                    self.pos += 1;
                }
            }
        }
    }

    fn array_step(&mut self, b: u8) {
        match b {
            b'{' => {
                self.out.push(b'{');
                self.stack.push(b'}');
                self.state = State::InObjectKey;
                self.pos += 1;
            }
            b'[' => {
                self.out.push(b'[');
                self.stack.push(b']');
                self.state = State::InArray;
                self.pos += 1;
            }
            b'"' | b'\'' => self.open_string(b, 1, State::InArray),
            b']' => {
                self.pos += 1;
                self.close_container(b']');
            }
            b',' => self.pos += 1, // stray comma before any element
            b'-' | b'+' => self.state = State::InNumber,
            _ if b.is_ascii_digit() => self.state = State::InNumber,
            _ => {
                if let Some(delim) = smart_quote_at(self.input, self.pos) {
                    self.open_string(delim, 3, State::InArray);
                } else if !(b.is_ascii_alphabetic() && self.try_keyword()) {
                    self.pos += 1;
                }
            }
        }
    }

    fn comma_or_end_step(&mut self, b: u8) {
        let Some(&top) = self.stack.last() else {
            self.state = State::Start;
            return;
        };
        if b == top {
            self.pos += 1;
            self.close_container(top);
            return;
        }
        // a deleted key can leave the container empty; no comma then
        let end = trim_end_ws(&self.out);
        let at_container_start = end > 0 && matches!(self.out[end - 1], b'{' | b'[');
        if b == b',' {
            self.pos += 1;
            if !at_container_start {
                self.out.push(b',');
                self.preserve_spaces();
            }
        } else if !at_container_start {
            self.log("inserted missing comma");
            self.out.push(b',');
        }
        self.state = if top == b'}' {
            State::InObjectKey
        } else {
            State::InArray
        };
    }

    fn open_string(&mut self, delim: u8, advance: usize, before: State) {
        if before == State::InObjectKey {
            self.current_key_start = Some(self.out.len());
        }
        if delim == b'\'' {
            self.log("converted single-quoted string");
        }
        self.out.push(b'"');
        self.in_string = true;
        self.string_delim = delim;
        self.state_before_string = before;
        self.state = State::InString;
        self.pos += advance;
    }

    /// Copy literal spaces that follow an emitted `:` or `,` so typical
    /// pretty-ish inputs keep their separator spacing.
    fn preserve_spaces(&mut self) {
        while self.input.get(self.pos) == Some(&b' ') {
            self.out.push(b' ');
            self.pos += 1;
        }
    }

    /// When a value slot is abandoned (output still ends with the `:`),
    /// substitute "" or delete the pending key.
    fn missing_value_if_pending(&mut self) {
        let end = trim_end_ws(&self.out);
        if end == 0 || self.out[end - 1] != b':' {
            return;
        }
        if self.opts.omit_empty_values {
            self.log("removed key with missing value");
            self.remove_current_key();
        } else {
            self.log("added empty string for missing value");
            self.out.extend_from_slice(b"\"\"");
        }
    }

    fn close_container(&mut self, closer: u8) {
        self.trim_trailing_comma();
        self.out.push(closer);
        self.stack.pop();
        if closer == b'}' {
            self.current_key_start = None;
        }
        self.state = if self.stack.is_empty() {
            State::Start
        } else {
            State::ExpectingCommaOrEnd
        };
    }

    fn trim_trailing_comma(&mut self) {
        let mut end = trim_end_ws(&self.out);
        if end > 0 && self.out[end - 1] == b',' {
            end -= 1;
            end = trim_end_ws(&self.out[..end]);
            self.out.truncate(end);
        }
    }

    /// Truncate the output back to the start of the most recent key, then
    /// drop any comma (and whitespace) that separated it from the previous
    /// member. No-op when no key is pending.
    fn remove_current_key(&mut self) {
        let Some(start) = self.current_key_start.take() else {
            return;
        };
        self.out.truncate(start);
        self.trim_trailing_comma();
        let end = trim_end_ws(&self.out);
        self.out.truncate(end);
    }

    /// Close everything still open once the input is exhausted.
    fn finish(&mut self) {
        if self.in_string {
            if self.opts.omit_incomplete_strings
                && self.state_before_string == State::InObjectValue
            {
                self.log("removed incomplete string value");
                self.remove_current_key();
                self.in_string = false;
                self.state = State::ExpectingCommaOrEnd;
            } else {
                self.log("closed unclosed string at end of input");
                self.close_string();
            }
        }
        if self.state == State::ExpectingColon {
            // input ended on a bare key
            if self.opts.omit_empty_values {
                self.log("removed key with missing value");
                self.remove_current_key();
            } else {
                self.log("added empty string for missing value");
                self.out.extend_from_slice(b":\"\"");
            }
            self.state = State::ExpectingCommaOrEnd;
        }
        if self.state == State::InObjectKey
            && self.out.last() == Some(&b'"')
            && !self.out.ends_with(b":\"\"")
        {
            if self.opts.omit_empty_values {
                self.remove_current_key();
            } else {
                self.out.extend_from_slice(b":\"\"");
            }
        }
        if self.state == State::InObjectValue {
            let end = trim_end_ws(&self.out);
            if end > 0 && self.out[end - 1] == b':' {
                self.out.truncate(end);
                if self.opts.omit_empty_values {
                    self.log("removed key with missing value");
                    self.remove_current_key();
                } else {
                    self.log("added empty string for missing value");
                    self.out.extend_from_slice(b"\"\"");
                }
            }
        }
        while let Some(closer) = self.stack.pop() {
            self.trim_trailing_comma();
            if closer == b'}' {
                let end = trim_end_ws(&self.out);
                if end > 0 && self.out[end - 1] == b':' {
                    if self.opts.omit_empty_values && self.current_key_start.is_some() {
                        self.remove_current_key();
                        self.trim_trailing_comma();
                    } else {
                        self.out.extend_from_slice(b"\"\"");
                    }
                }
            }
            self.log("added missing closer");
            self.out.push(closer);
            self.current_key_start = None;
        }
    }
}
