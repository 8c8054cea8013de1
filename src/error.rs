use crate::methods::Method;

/// Failures surfaced by drift correction.
///
/// Every variant is produced before any fixation is modified.
#[derive(Clone, Debug, PartialEq)]
pub enum CorrectionError {
    /// Malformed fixations, geometry or jury input.
    InvalidInput(String),
    /// Method name outside the supported set.
    UnknownMethod { name: String },
    /// The method needs a capability that was compiled out.
    DependencyUnavailable {
        method: Method,
        capability: &'static str,
    },
    /// No active fixations to correct.
    EmptySequence,
}

impl CorrectionError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        CorrectionError::InvalidInput(reason.into())
    }
}

impl std::fmt::Display for CorrectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectionError::InvalidInput(reason) => write!(f, "invalid input: {reason}"),
            CorrectionError::UnknownMethod { name } => write!(
                f,
                "unknown correction method '{name}' (expected one of: {})",
                Method::ALL
                    .iter()
                    .map(|m| m.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            CorrectionError::DependencyUnavailable { method, capability } => write!(
                f,
                "method '{method}' requires the '{capability}' feature, which is not enabled"
            ),
            CorrectionError::EmptySequence => write!(f, "fixation sequence has no active fixations"),
        }
    }
}

impl std::error::Error for CorrectionError {}
