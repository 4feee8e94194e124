//! Path exemption policy for the request gate.
//!
//! Two disjoint, exact-match, case-insensitive path sets decide which
//! validation steps are skipped per request. The policy is built once at
//! startup and never mutated afterwards, so it is shared across request
//! workers behind an `Arc` without synchronization.

use std::collections::HashSet;

/// Paths exempt from token validation. A match skips the entire
/// token/inactivity pipeline.
pub const TOKEN_EXEMPT_PATHS: &[&str] = &["/Login/LoginUser", "/api/Login/LoginUser"];

/// Paths exempt from the inactivity check (evaluated only after token
/// acceptance).
pub const INACTIVITY_EXEMPT_PATHS: &[&str] = &[
    "/Login/LoginHeartBeat",
    "/api/Login/LoginHeartBeat",
    "/swagger",
    "/health",
];

/// Per-request classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathExemptions {
    /// Skip token validation (and with it the whole pipeline)
    pub skip_token_check: bool,
    /// Skip the inactivity check after token acceptance
    pub skip_inactivity_check: bool,
}

/// Immutable path exemption sets, fixed at process start
#[derive(Debug, Clone)]
pub struct PathPolicy {
    token_exempt: HashSet<String>,
    inactivity_exempt: HashSet<String>,
}

impl PathPolicy {
    /// Build a policy from explicit path lists. Matching is exact and
    /// case-insensitive; paths are normalized to lowercase once here.
    pub fn new<I, S>(token_exempt: I, inactivity_exempt: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            token_exempt: token_exempt
                .into_iter()
                .map(|p| p.as_ref().to_ascii_lowercase())
                .collect(),
            inactivity_exempt: inactivity_exempt
                .into_iter()
                .map(|p| p.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// The fixed production exemption sets
    pub fn standard() -> Self {
        Self::new(TOKEN_EXEMPT_PATHS.iter(), INACTIVITY_EXEMPT_PATHS.iter())
    }

    /// Classify a request path. Unknown paths are never exempted: the full
    /// pipeline applies.
    pub fn classify(&self, path: &str) -> PathExemptions {
        let normalized = path.to_ascii_lowercase();
        PathExemptions {
            skip_token_check: self.token_exempt.contains(&normalized),
            skip_inactivity_check: self.inactivity_exempt.contains(&normalized),
        }
    }
}

impl Default for PathPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_exempt_paths() {
        let policy = PathPolicy::standard();

        let exemptions = policy.classify("/Login/LoginUser");
        assert!(exemptions.skip_token_check);
        assert!(!exemptions.skip_inactivity_check);

        assert!(policy.classify("/api/Login/LoginUser").skip_token_check);
    }

    #[test]
    fn test_inactivity_exempt_paths() {
        let policy = PathPolicy::standard();

        for path in ["/Login/LoginHeartBeat", "/api/Login/LoginHeartBeat", "/swagger", "/health"] {
            let exemptions = policy.classify(path);
            assert!(exemptions.skip_inactivity_check, "{path} should skip inactivity");
            assert!(!exemptions.skip_token_check, "{path} should not skip token check");
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let policy = PathPolicy::standard();

        assert!(policy.classify("/login/loginuser").skip_token_check);
        assert!(policy.classify("/LOGIN/LOGINUSER").skip_token_check);
        assert!(policy.classify("/HEALTH").skip_inactivity_check);
    }

    #[test]
    fn test_unknown_paths_are_not_exempt() {
        let policy = PathPolicy::standard();

        for path in ["/", "/api/dealers", "/Login", "/Login/LoginUser/extra", "/healthz"] {
            let exemptions = policy.classify(path);
            assert!(!exemptions.skip_token_check, "{path} must not skip token check");
            assert!(!exemptions.skip_inactivity_check, "{path} must not skip inactivity");
        }
    }

    #[test]
    fn test_prefix_match_is_not_enough() {
        // Exact membership only; "/swagger/index.html" is a different path.
        let policy = PathPolicy::standard();
        assert!(!policy.classify("/swagger/index.html").skip_inactivity_check);
    }

    #[test]
    fn test_custom_sets() {
        let policy = PathPolicy::new(vec!["/open"], vec!["/ping"]);
        assert!(policy.classify("/open").skip_token_check);
        assert!(policy.classify("/ping").skip_inactivity_check);
        assert!(!policy.classify("/open").skip_inactivity_check);
    }
}
