//! Byte-level predicates shared by the sanitiser and the repair engine.
//! The engine is byte-addressed; multi-byte sequences only matter for the
//! typographic quote forms recognised here.

#[inline]
pub fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Bytes allowed in an unquoted object key.
#[inline]
pub fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Bytes allowed in the identifier between a quote and a colon when deciding
/// whether an embedded quote actually begins a new key.
#[inline]
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

#[inline]
pub fn is_quote(b: u8) -> bool {
    b == b'"' || b == b'\''
}

/// If a 3-byte typographic quote starts at `i`, return the ASCII delimiter it
/// maps to: U+201C/U+201D map to `"`, U+2018/U+2019 map to `'`.
#[inline]
pub fn smart_quote_at(bytes: &[u8], i: usize) -> Option<u8> {
    if i + 3 <= bytes.len() && bytes[i] == 0xE2 && bytes[i + 1] == 0x80 {
        match bytes[i + 2] {
            0x9C | 0x9D => Some(b'"'),
            0x98 | 0x99 => Some(b'\''),
            _ => None,
        }
    } else {
        None
    }
}

/// Length of trailing ASCII whitespace trimmed from `bytes`.
#[inline]
pub fn trim_end_ws(bytes: &[u8]) -> usize {
    let mut end = bytes.len();
    while end > 0 && is_ws(bytes[end - 1]) {
        end -= 1;
    }
    end
}
