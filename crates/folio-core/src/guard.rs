//! Access guard for mutating operations.
//!
//! A single admin secret is configured at startup. Every authentication
//! attempt and every write presents a candidate that must equal it exactly.
//!
//! # Security model
//!
//! - No secret configured means every attempt is denied, never permitted.
//! - An empty configured secret counts as no secret.
//! - Comparison uses `subtle::ConstantTimeEq`; equal-length candidates take
//!   the same time whether or not they match.
//! - The secret is zeroized on drop and redacted from `Debug` output.
//! - There is no hashing, rate limiting, or lockout.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Binary allow/deny decision against the configured admin secret.
pub struct AccessGuard {
    secret: Option<Zeroizing<String>>,
}

impl AccessGuard {
    /// Create a guard for the given secret. `None` or `""` denies everything.
    #[must_use]
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()).map(Zeroizing::new),
        }
    }

    /// A guard with no secret configured.
    #[must_use]
    pub fn deny_all() -> Self {
        Self { secret: None }
    }

    /// Whether a secret is configured at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Check a caller-supplied credential.
    ///
    /// Returns `true` iff a secret is configured and `supplied` is present and
    /// byte-for-byte equal to it.
    #[must_use]
    pub fn verify(&self, supplied: Option<&str>) -> bool {
        let (Some(expected), Some(supplied)) = (self.secret.as_ref(), supplied) else {
            return false;
        };
        expected.as_bytes().ct_eq(supplied.as_bytes()).into()
    }
}

impl fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGuard")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_secret_is_allowed() {
        let guard = AccessGuard::new(Some("S".to_owned()));
        assert!(guard.verify(Some("S")));
    }

    #[test]
    fn wrong_secret_is_denied() {
        let guard = AccessGuard::new(Some("hunter2".to_owned()));
        assert!(!guard.verify(Some("wrong")));
        assert!(!guard.verify(Some("hunter")));
        assert!(!guard.verify(Some("hunter22")));
        assert!(!guard.verify(Some("HUNTER2")));
        assert!(!guard.verify(Some("")));
        assert!(!guard.verify(None));
    }

    #[test]
    fn absent_secret_denies_everything() {
        let guard = AccessGuard::deny_all();
        assert!(!guard.is_configured());
        assert!(!guard.verify(Some("")));
        assert!(!guard.verify(Some("anything")));
        assert!(!guard.verify(None));
    }

    #[test]
    fn empty_secret_counts_as_absent() {
        let guard = AccessGuard::new(Some(String::new()));
        assert!(!guard.is_configured());
        assert!(!guard.verify(Some("")));
    }

    #[test]
    fn comparison_is_exact_not_trimmed() {
        let guard = AccessGuard::new(Some("pa ss".to_owned()));
        assert!(guard.verify(Some("pa ss")));
        assert!(!guard.verify(Some(" pa ss")));
        assert!(!guard.verify(Some("pa ss\n")));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let guard = AccessGuard::new(Some("topsecret".to_owned()));
        let rendered = format!("{guard:?}");
        assert!(!rendered.contains("topsecret"));
        assert!(rendered.contains("configured: true"));
    }
}
