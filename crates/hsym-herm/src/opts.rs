use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Options controlling which invariant checks run on each call.
///
/// The defaults verify everything. Disabling a check is only sound when the
/// basis is known to come from [`crate::hermitian_basis`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyOpts {
    /// Re-check pairwise orthogonality of the basis.
    #[serde(default = "default_true")]
    pub orthogonality: bool,
    /// Check that the coordinates reconstruct the input matrix exactly.
    #[serde(default = "default_true")]
    pub reconstruction: bool,
}

impl Default for VerifyOpts {
    fn default() -> Self {
        Self {
            orthogonality: default_true(),
            reconstruction: default_true(),
        }
    }
}

impl VerifyOpts {
    /// Skips every check.
    pub fn trusted() -> Self {
        Self {
            orthogonality: false,
            reconstruction: false,
        }
    }
}
