//! Secret handling: [`SecretMatcher`] decides which variable names get a
//! hidden prompt, [`OutputMasker`] keeps their values out of output.

pub mod mask;
pub mod pattern;

pub use mask::{hint, OutputMasker};
pub use pattern::{SecretMatcher, BUILTIN_PATTERNS};
