use crate::engine::{Engine, Logger};
use crate::error::{RepairError, RepairErrorKind};
use crate::options::Options;
use crate::sanitize::sanitize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairLogEntry {
    pub position: usize,
    pub message: &'static str,
    pub context: String,
}

pub(crate) fn repair_to_string(input: &str, opts: &Options) -> Result<String, RepairError> {
    let mut logger = Logger::new(opts.logging, opts.log_context_window);
    repair_impl(input, opts, &mut logger)
}

pub(crate) fn repair_to_string_with_log(
    input: &str,
    opts: &Options,
) -> Result<(String, Vec<RepairLogEntry>), RepairError> {
    // Force-enable logging for this call and return captured log entries
    let mut logger = Logger::new(true, opts.log_context_window);
    let out = repair_impl(input, opts, &mut logger)?;
    Ok((out, logger.into_entries()))
}

fn repair_impl(input: &str, opts: &Options, logger: &mut Logger) -> Result<String, RepairError> {
    // Already-valid input passes through byte-for-byte.
    if !input.is_empty() && serde_json::from_str::<serde_json::Value>(input).is_ok() {
        return Ok(input.to_string());
    }

    let sanitized = sanitize(input, opts, logger);
    let engine = Engine::new(sanitized.as_bytes(), opts, logger);
    let out = engine.run();
    let mut out = String::from_utf8(out)
        .map_err(|e| RepairError::new(RepairErrorKind::Parse(format!("utf8 error: {}", e)), 0))?;

    if !opts.ensure_ascii && !out.is_empty() {
        // Re-encode so \uXXXX escapes become literal characters; serde_json
        // leaves non-ASCII and forward slashes unescaped.
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&out) {
            out = serde_json::to_string(&value)
                .map_err(|e| RepairError::from_serde("serialize", e))?;
        }
    }

    if !out.is_empty() && serde_json::from_str::<serde_json::Value>(&out).is_err() {
        return Err(RepairError::new(RepairErrorKind::RepairFailed(out), 0));
    }
    Ok(out)
}
