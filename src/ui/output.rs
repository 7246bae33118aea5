//! How much a front-end prints.

/// Verbosity picked from `--verbose` / `--quiet`.
///
/// Ordered from loudest to quietest; errors are printed in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum OutputMode {
    /// Also echoes `netlify` output while deploying.
    Verbose,
    #[default]
    Normal,
    Quiet,
    /// Errors only.
    Silent,
}

impl OutputMode {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub fn shows_command_output(self) -> bool {
        self == Self::Verbose
    }

    pub fn shows_spinners(self) -> bool {
        self < Self::Silent
    }

    pub fn shows_status(self) -> bool {
        self != Self::Silent
    }
}
