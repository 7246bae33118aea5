//! Human-readable analysis report.

use super::types::ProjectAnalysis;

fn mark(flag: bool) -> &'static str {
    if flag {
        "✓"
    } else {
        "✗"
    }
}

/// Render the report body as lines (without header).
pub fn report_lines(analysis: &ProjectAnalysis) -> Vec<String> {
    let a = analysis;
    let mut lines = vec![
        format!("  Project path: {}", a.path),
        format!("  File count:   {}", a.file_count),
        String::new(),
        format!("  Project type: {}", a.type_name),
        String::new(),
        "  Detected files:".to_string(),
        format!("    {} HTML files", mark(a.has_html)),
        format!("    {} Python files", mark(a.has_python)),
        format!("    {} Node.js (package.json)", mark(a.has_node)),
        String::new(),
        "  Existing configuration:".to_string(),
        format!("    {} netlify.toml", mark(a.has_netlify_config)),
        format!("    {} .gitignore", mark(a.has_gitignore)),
        format!("    {} .env.example", mark(a.has_env_example)),
        format!("    {} requirements.txt", mark(a.has_requirements)),
    ];

    if !a.env_vars_needed.is_empty() {
        lines.push(String::new());
        lines.push("  Environment variables likely needed:".to_string());
        for var in &a.env_vars_needed {
            lines.push(format!("    • {}", var));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_marks_flags() {
        let mut a = ProjectAnalysis::empty("/srv/site");
        a.has_html = true;
        let lines = report_lines(&a);
        assert!(lines.iter().any(|l| l.contains("/srv/site")));
        assert!(lines.contains(&"    ✓ HTML files".to_string()));
        assert!(lines.contains(&"    ✗ Python files".to_string()));
    }

    #[test]
    fn report_lists_env_vars_only_when_present() {
        let mut a = ProjectAnalysis::empty(".");
        assert!(!report_lines(&a).iter().any(|l| l.contains("Environment")));

        a.env_vars_needed = vec!["OPENAI_API_KEY".to_string()];
        let lines = report_lines(&a);
        assert!(lines.contains(&"    • OPENAI_API_KEY".to_string()));
    }
}
