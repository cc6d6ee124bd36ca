use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairErrorKind {
    /// Post-finalisation output was non-empty but failed a strict JSON parse.
    /// Carries the produced output for diagnosis.
    RepairFailed(String),
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairError {
    pub kind: RepairErrorKind,
    pub position: usize,
}

impl RepairError {
    pub fn new(kind: RepairErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn from_serde(what: &str, err: serde_json::Error) -> Self {
        let pos = err.line(); // coarse fallback
        Self {
            kind: RepairErrorKind::Parse(format!("serde_json {} error: {}", what, err)),
            position: pos,
        }
    }
}

impl fmt::Display for RepairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RepairErrorKind::RepairFailed(out) => {
                write!(
                    f,
                    "repaired output is not valid JSON ({} bytes produced)",
                    out.len()
                )
            }
            RepairErrorKind::Parse(msg) => write!(f, "{} at position {}", msg, self.position),
        }
    }
}

impl std::error::Error for RepairError {}
