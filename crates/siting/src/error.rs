use std::fmt;

/// Errors raised at the API boundary, before any computation starts.
///
/// Degenerate-but-valid inputs (empty demand, rings with no sampled interior)
/// are not errors; they fall back to the region center.
#[derive(Debug, Clone, PartialEq)]
pub enum SitingError {
    InvalidGeometry { reason: String },
    InvalidParams { reason: String },
}

impl SitingError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn params(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SitingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { reason } => write!(f, "invalid geometry: {reason}"),
            Self::InvalidParams { reason } => write!(f, "invalid placement params: {reason}"),
        }
    }
}

impl std::error::Error for SitingError {}
