//! Hiding secret values in text meant for people or logs.

/// Replacement for every masked value.
pub const REDACTED: &str = "[REDACTED]";

/// Set of secret values to blank out of displayed text.
///
/// ```
/// use netlify_ai::secrets::OutputMasker;
///
/// let masker = OutputMasker::from_values(["sk-live-abc123"]);
/// let output = masker.mask("netlify env:set OPENAI_API_KEY sk-live-abc123");
/// assert_eq!(output, "netlify env:set OPENAI_API_KEY [REDACTED]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutputMasker {
    /// Longest first, so a value containing another is replaced whole.
    values: Vec<String>,
}

impl OutputMasker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut masker = Self::new();
        for value in values {
            masker.add_secret(value);
        }
        masker
    }

    /// Empty values and duplicates are ignored.
    pub fn add_secret(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() || self.values.contains(&value) {
            return;
        }
        let at = self
            .values
            .iter()
            .position(|v| v.len() < value.len())
            .unwrap_or(self.values.len());
        self.values.insert(at, value);
    }

    pub fn mask(&self, input: &str) -> String {
        self.values
            .iter()
            .fold(input.to_string(), |text, secret| text.replace(secret, REDACTED))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Recognisable but safe form of a key, e.g. `sk-p…7f2a`.
///
/// Eight characters or fewer are starred out entirely.
pub fn hint(value: &str) -> String {
    let count = value.chars().count();
    if count <= 8 {
        return "*".repeat(count);
    }
    let head: String = value.chars().take(4).collect();
    let tail: String = value.chars().skip(count - 4).collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_every_occurrence() {
        let masker = OutputMasker::from_values(["tok"]);
        assert_eq!(masker.mask("tok tok"), "[REDACTED] [REDACTED]");
    }

    #[test]
    fn empty_and_duplicate_values_are_dropped() {
        let mut masker = OutputMasker::new();
        masker.add_secret("");
        assert!(masker.is_empty());
        masker.add_secret("nfp_abc");
        masker.add_secret("nfp_abc");
        assert_eq!(masker.values.len(), 1);
    }

    #[test]
    fn containing_value_is_masked_whole() {
        let masker = OutputMasker::from_values(["abc", "abcdef"]);
        assert_eq!(masker.mask("key=abcdef"), "key=[REDACTED]");
    }

    #[test]
    fn text_without_secrets_is_unchanged() {
        assert_eq!(OutputMasker::new().mask("netlify status"), "netlify status");
    }

    #[test]
    fn hint_keeps_four_chars_each_side() {
        assert_eq!(hint("sk-proj-1234567890"), "sk-p…7890");
        assert_eq!(hint("short"), "*****");
        assert_eq!(hint(""), "");
    }
}
