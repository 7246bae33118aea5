//! `netlify.toml` rendering.

/// Python runtime pinned in `[build.environment]` when none is configured.
pub const DEFAULT_PYTHON_VERSION: &str = "3.10";

/// Inputs for [`render_netlify_toml`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetlifyTomlOptions {
    pub publish_dir: String,
    pub functions_dir: Option<String>,
    pub build_command: Option<String>,
    pub python_version: String,
}

impl Default for NetlifyTomlOptions {
    fn default() -> Self {
        Self {
            publish_dir: ".".to_string(),
            functions_dir: None,
            build_command: None,
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
        }
    }
}

fn quote(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Render `netlify.toml` content.
///
/// Functions, the Python runtime and the `/api/*` redirect are only emitted
/// when a functions directory is set.
pub fn render_netlify_toml(opts: &NetlifyTomlOptions) -> String {
    let functions_dir = non_empty(&opts.functions_dir);
    let mut lines = vec!["[build]".to_string()];

    if let Some(dir) = functions_dir {
        lines.push(format!("  functions = {}", quote(dir)));
    }
    lines.push(format!("  publish = {}", quote(&opts.publish_dir)));
    if let Some(cmd) = non_empty(&opts.build_command) {
        lines.push(format!("  command = {}", quote(cmd)));
    }

    if functions_dir.is_some() {
        lines.push(String::new());
        lines.push("[build.environment]".to_string());
        lines.push(format!("  PYTHON_VERSION = {}", quote(&opts.python_version)));
        lines.push(String::new());
        lines.push("[[redirects]]".to_string());
        lines.push("  from = \"/api/*\"".to_string());
        lines.push("  to = \"/.netlify/functions/:splat\"".to_string());
        lines.push("  status = 200".to_string());
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_site_has_only_publish() {
        let out = render_netlify_toml(&NetlifyTomlOptions::default());
        assert_eq!(out, "[build]\n  publish = \".\"\n");
    }

    #[test]
    fn functions_site_layout() {
        let out = render_netlify_toml(&NetlifyTomlOptions {
            publish_dir: "public".into(),
            functions_dir: Some("netlify/functions".into()),
            build_command: None,
            python_version: "3.11".into(),
        });
        let expected = "[build]\n  functions = \"netlify/functions\"\n  publish = \"public\"\n\n\
                        [build.environment]\n  PYTHON_VERSION = \"3.11\"\n\n\
                        [[redirects]]\n  from = \"/api/*\"\n  to = \"/.netlify/functions/:splat\"\n  status = 200\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn build_command_emitted_when_set() {
        let out = render_netlify_toml(&NetlifyTomlOptions {
            build_command: Some("npm run build".into()),
            ..Default::default()
        });
        assert!(out.contains("  command = \"npm run build\"\n"));
        assert!(!out.contains("[[redirects]]"));
    }

    #[test]
    fn blank_optional_values_are_dropped() {
        let out = render_netlify_toml(&NetlifyTomlOptions {
            functions_dir: Some("  ".into()),
            build_command: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(out, "[build]\n  publish = \".\"\n");
    }

    #[test]
    fn output_is_valid_toml_even_with_quotes() {
        let out = render_netlify_toml(&NetlifyTomlOptions {
            publish_dir: "dist".into(),
            functions_dir: Some("fns".into()),
            build_command: Some("echo \"hi\" && npm run build".into()),
            python_version: DEFAULT_PYTHON_VERSION.into(),
        });
        let parsed: toml::Value = toml::from_str(&out).unwrap();
        assert_eq!(
            parsed["build"]["command"].as_str(),
            Some("echo \"hi\" && npm run build")
        );
        assert_eq!(parsed["redirects"][0]["status"].as_integer(), Some(200));
    }
}
