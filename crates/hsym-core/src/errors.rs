//! Structured error types shared across HSYM crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HsymError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, shapes, offending values).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for HSYM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HsymError {
    /// Matrices of incompatible shape, or an invalid dimension.
    #[error("shape error: {0}")]
    Shape(ErrorInfo),
    /// A checked invariant (orthogonality, basis size, reconstruction) failed.
    #[error("consistency error: {0}")]
    Consistency(ErrorInfo),
    /// Invalid scalar arithmetic.
    #[error("expression error: {0}")]
    Expr(ErrorInfo),
    /// Serialization errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl HsymError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HsymError::Shape(info)
            | HsymError::Consistency(info)
            | HsymError::Expr(info)
            | HsymError::Serde(info) => info,
        }
    }

    /// Shorthand for the stable error code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Builds a [`HsymError::Shape`] describing two mismatched shapes.
    pub fn shape_mismatch(op: &str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        HsymError::Shape(
            ErrorInfo::new("shape-mismatch", format!("{op} requires compatible shapes"))
                .with_context("lhs", format!("{}x{}", lhs.0, lhs.1))
                .with_context("rhs", format!("{}x{}", rhs.0, rhs.1)),
        )
    }
}
