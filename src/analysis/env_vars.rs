//! Environment variable detection from source keywords.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// A variable and the lower-case keywords that suggest a project needs it.
#[derive(Debug, Clone, Copy)]
pub struct EnvVarRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// Built-in detection rules, in reporting order.
pub const ENV_VAR_RULES: &[EnvVarRule] = &[
    EnvVarRule {
        name: "OPENAI_API_KEY",
        keywords: &["openai", "gpt", "chatgpt"],
    },
    EnvVarRule {
        name: "GOOGLE_API_KEY",
        keywords: &["google", "gemini", "generativeai"],
    },
    EnvVarRule {
        name: "ANTHROPIC_API_KEY",
        keywords: &["anthropic", "claude"],
    },
    EnvVarRule {
        name: "DATABASE_URL",
        keywords: &["database", "postgres", "mysql", "mongodb"],
    },
    EnvVarRule {
        name: "SECRET_KEY",
        keywords: &["secret", "jwt", "session"],
    },
    EnvVarRule {
        name: "API_KEY",
        keywords: &["api_key", "apikey"],
    },
];

/// Extensions whose contents are searched.
const SOURCE_EXTENSIONS: &[&str] = &[".py", ".js", ".ts", ".jsx", ".tsx"];

/// Check whether a relative path names a source file worth searching.
pub fn is_source_file(path: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Indexes into [`ENV_VAR_RULES`] of the rules whose keywords appear in
/// `content`, which must already be lower-cased.
pub fn match_content(content: &str) -> impl Iterator<Item = usize> + '_ {
    ENV_VAR_RULES
        .iter()
        .enumerate()
        .filter(move |(_, rule)| rule.keywords.iter().any(|kw| content.contains(kw)))
        .map(|(i, _)| i)
}

/// Detect variables needed by the source files among `files`.
///
/// The result is de-duplicated and follows [`ENV_VAR_RULES`] order.
pub fn detect_env_vars(root: &Path, files: &[String]) -> Vec<String> {
    let mut found = BTreeSet::new();

    for file in files.iter().filter(|f| is_source_file(f)) {
        let bytes = match fs::read(root.join(file)) {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", file, e);
                continue;
            }
        };
        let content = String::from_utf8_lossy(&bytes).to_lowercase();
        found.extend(match_content(&content));
    }

    found
        .into_iter()
        .map(|i| ENV_VAR_RULES[i].name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn source_file_extensions() {
        assert!(is_source_file("api/chat.py"));
        assert!(is_source_file("src/App.tsx"));
        assert!(!is_source_file("README.md"));
        assert!(!is_source_file("styles.css"));
    }

    #[test]
    fn match_content_finds_multiple() {
        let hits: Vec<_> = match_content("import openai\nfrom jwt import encode")
            .map(|i| ENV_VAR_RULES[i].name)
            .collect();
        assert_eq!(hits, vec!["OPENAI_API_KEY", "SECRET_KEY"]);
    }

    #[test]
    fn detect_is_case_insensitive_and_ordered() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.py"), "DATABASE = Postgres()").unwrap();
        std::fs::write(temp.path().join("b.js"), "const client = new Anthropic()").unwrap();
        std::fs::write(temp.path().join("c.js"), "// claude again").unwrap();

        let files = vec!["a.py".to_string(), "b.js".to_string(), "c.js".to_string()];
        let vars = detect_env_vars(temp.path(), &files);
        assert_eq!(vars, vec!["ANTHROPIC_API_KEY", "DATABASE_URL"]);
    }

    #[test]
    fn detect_ignores_non_source_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("notes.md"), "openai gemini").unwrap();

        let vars = detect_env_vars(temp.path(), &["notes.md".to_string()]);
        assert!(vars.is_empty());
    }

    #[test]
    fn detect_tolerates_invalid_utf8_and_missing_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("bin.py"), [0xff, 0xfe, b'g', b'p', b't']).unwrap();

        let files = vec!["bin.py".to_string(), "gone.py".to_string()];
        let vars = detect_env_vars(temp.path(), &files);
        assert_eq!(vars, vec!["OPENAI_API_KEY"]);
    }
}
