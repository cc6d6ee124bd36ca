mod classify;
pub mod cli;
mod engine;
pub mod error;
pub mod options;
mod repair;
mod sanitize;

pub use error::{RepairError, RepairErrorKind};
pub use options::Options;
pub use repair::RepairLogEntry;

/// Repair a potentially invalid JSON string into a valid JSON string.
/// This function focuses on common issues like unquoted keys/strings,
/// missing commas/colons, comments, single quotes, markdown fences, and
/// unclosed brackets/braces, including input truncated mid-token.
pub fn repair_to_string(input: &str, opts: &Options) -> Result<String, RepairError> {
    repair::repair_to_string(input, opts)
}

use std::io::Write;

/// Repair a potentially invalid JSON string and write the result into an
/// `io::Write`.
pub fn repair_to_writer<W: Write>(
    input: &str,
    opts: &Options,
    writer: &mut W,
) -> Result<(), RepairError> {
    let s = repair_to_string(input, opts)?;
    writer
        .write_all(s.as_bytes())
        .map_err(|e| RepairError::from_serde("write", serde_json::Error::io(e)))
}

/// Repair and then parse into `serde_json::Value`. Parse failures surface
/// the decoder's error unchanged.
pub fn repair_to_value(input: &str, opts: &Options) -> Result<serde_json::Value, RepairError> {
    let s = repair_to_string(input, opts)?;
    let v = serde_json::from_str(&s).map_err(|e| RepairError::from_serde("parse", e))?;
    Ok(v)
}

/// Repair a potentially invalid JSON string and return both the string
/// result and a repair log.
pub fn repair_to_string_with_log(
    input: &str,
    opts: &Options,
) -> Result<(String, Vec<RepairLogEntry>), RepairError> {
    repair::repair_to_string_with_log(input, opts)
}

#[cfg(test)]
mod tests;
