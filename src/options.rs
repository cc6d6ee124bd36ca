#[derive(Clone, Debug)]
pub struct Options {
    /// When false, decode the repaired output and re-encode it with
    /// non-ASCII characters and forward slashes left literal.
    pub ensure_ascii: bool,
    /// Delete a key instead of substituting "" when its value is missing.
    pub omit_empty_values: bool,
    /// Delete a key whose string value is still open at end of input
    /// instead of closing the string.
    pub omit_incomplete_strings: bool,
    /// Skip Markdown fenced code blocks like ```json ... ``` around the JSON.
    pub fenced_code_blocks: bool,
    /// Enable repair logging. Use `repair_to_string_with_log` to retrieve logs.
    pub logging: bool,
    /// Context window size used when building log context snippets.
    /// Controls how many bytes are captured on both sides of the position.
    pub log_context_window: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ensure_ascii: true,
            omit_empty_values: false,
            omit_incomplete_strings: false,
            fenced_code_blocks: true,
            logging: false,
            log_context_window: 15,
        }
    }
}
