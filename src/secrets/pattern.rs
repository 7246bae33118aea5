//! Which environment variable names hold secrets.
//!
//! The wizard reads those values without echo and never logs them.

use regex::RegexSet;

/// Name suffixes that mark a variable as secret, matched case-insensitively.
pub const BUILTIN_PATTERNS: &[&str] = &[
    r"API_?KEY$",
    r"SECRET(_KEY)?$",
    r"TOKEN$",
    r"(PASSWORD|PASSWD|PWD)$",
    r"PRIVATE_KEY$",
    r"(CONNECTION_STRING|DATABASE_URL)$",
];

/// ```
/// use netlify_ai::secrets::SecretMatcher;
///
/// let matcher = SecretMatcher::with_builtins();
/// assert!(matcher.is_secret("OPENAI_API_KEY"));
/// assert!(matcher.is_secret("DATABASE_URL"));
/// assert!(!matcher.is_secret("NODE_VERSION"));
/// ```
#[derive(Debug, Clone)]
pub struct SecretMatcher {
    set: RegexSet,
}

impl SecretMatcher {
    pub fn with_builtins() -> Self {
        let set = RegexSet::new(BUILTIN_PATTERNS.iter().map(|p| format!("(?i){p}")))
            .unwrap_or_else(|e| {
                tracing::error!("secret patterns rejected: {e}");
                RegexSet::empty()
            });
        Self { set }
    }

    pub fn is_secret(&self, env_name: &str) -> bool {
        self.set.is_match(env_name)
    }
}

impl Default for SecretMatcher {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detected_variables_are_secrets() {
        let matcher = SecretMatcher::with_builtins();
        for name in [
            "OPENAI_API_KEY",
            "GOOGLE_API_KEY",
            "ANTHROPIC_API_KEY",
            "DATABASE_URL",
            "SECRET_KEY",
            "API_KEY",
        ] {
            assert!(matcher.is_secret(name), "{name} should be secret");
        }
    }

    #[test]
    fn token_and_password_variants() {
        let matcher = SecretMatcher::default();
        assert!(matcher.is_secret("NETLIFY_AUTH_TOKEN"));
        assert!(matcher.is_secret("db_password"));
        assert!(matcher.is_secret("stripe_apikey"));
    }

    #[test]
    fn plain_settings_are_not_secrets() {
        let matcher = SecretMatcher::with_builtins();
        assert!(!matcher.is_secret("PYTHON_VERSION"));
        assert!(!matcher.is_secret("NODE_ENV"));
        assert!(!matcher.is_secret("SITE_NAME"));
    }
}
