//! `netlify-ai completions <SHELL>` prints a completion script to stdout.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// Binary name completions are generated for.
pub const BIN_NAME: &str = "netlify-ai";

pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    pub fn write_to(&self, out: &mut dyn std::io::Write) {
        clap_complete::generate(self.args.shell, &mut Cli::command(), BIN_NAME, out);
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        self.write_to(&mut std::io::stdout());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        CompletionsCommand::new(CompletionsArgs { shell }).write_to(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn generates_bash_completions() {
        let output = script(Shell::Bash);
        assert!(output.contains("netlify-ai"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn zsh_lists_subcommands() {
        let output = script(Shell::Zsh);
        assert!(output.contains("deploy"));
        assert!(output.contains("serve"));
    }

    #[test]
    fn generates_fish_completions() {
        assert!(script(Shell::Fish).contains("netlify-ai"));
    }
}
