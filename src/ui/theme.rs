//! Wizard colours and line formats.

use console::Style;

/// Outcome tone of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
}

impl Tone {
    fn marker(self) -> char {
        match self {
            Tone::Success => '✓',
            Tone::Warning => '⚠',
            Tone::Error => '✗',
        }
    }
}

/// Styles for the terminal front-end; `plain()` when colour is off.
#[derive(Debug, Clone)]
pub struct DeployTheme {
    colored: bool,
}

impl Default for DeployTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DeployTheme {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn plain() -> Self {
        Self { colored: false }
    }

    fn style(&self, build: impl FnOnce(Style) -> Style) -> Style {
        if self.colored {
            build(Style::new())
        } else {
            Style::new()
        }
    }

    fn tone_style(&self, tone: Tone) -> Style {
        self.style(|s| match tone {
            Tone::Success => s.green(),
            Tone::Warning => s.yellow(),
            Tone::Error => s.red().bold(),
        })
    }

    /// `<marker> msg` in the tone's colour.
    pub fn status(&self, tone: Tone, msg: &str) -> String {
        self.tone_style(tone)
            .apply_to(format!("{} {}", tone.marker(), msg))
            .to_string()
    }

    pub fn format_success(&self, msg: &str) -> String {
        self.status(Tone::Success, msg)
    }

    pub fn format_warning(&self, msg: &str) -> String {
        self.status(Tone::Warning, msg)
    }

    pub fn format_error(&self, msg: &str) -> String {
        self.status(Tone::Error, msg)
    }

    /// `[n/total] title`
    pub fn format_step(&self, current: usize, total: usize, title: &str) -> String {
        let counter = self.style(|s| s.cyan()).apply_to(format!("[{current}/{total}]"));
        let title = self.style(|s| s.bold()).apply_to(title);
        format!("{counter} {title}")
    }

    /// Title between two rules of `=`.
    pub fn format_header(&self, title: &str) -> String {
        let rule = self.style(|s| s.dim()).apply_to("=".repeat(60));
        let title = self.style(|s| s.bold().cyan()).apply_to(title);
        format!("{rule}\n  {title}\n{rule}")
    }

    pub fn format_hint(&self, hint: &str) -> String {
        format!("  {}", self.style(|s| s.cyan().dim()).apply_to(hint))
    }
}

/// Colour is on for a TTY stdout unless `NO_COLOR` is set.
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_status_lines() {
        let theme = DeployTheme::plain();
        assert_eq!(theme.format_success("Done"), "✓ Done");
        assert_eq!(theme.format_warning("Careful"), "⚠ Careful");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
        assert_eq!(theme.status(Tone::Success, "ok"), theme.format_success("ok"));
    }

    #[test]
    fn plain_step_and_hint() {
        let theme = DeployTheme::plain();
        assert_eq!(
            theme.format_step(2, 5, "Confirm configuration"),
            "[2/5] Confirm configuration"
        );
        assert_eq!(theme.format_hint("netlify login"), "  netlify login");
    }

    #[test]
    fn header_is_framed() {
        let header = DeployTheme::plain().format_header("Netlify AI");
        let lines: Vec<_> = header.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "  Netlify AI");
        assert!(lines[0].chars().all(|c| c == '='));
    }
}
