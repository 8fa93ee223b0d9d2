//! CLI subcommand implementations.

pub mod assets;
pub mod fetch;
pub mod incomes;
pub mod lookups;

use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Asks a yes/no question on stderr and reads the answer from stdin.
/// Anything other than `y` or `yes` counts as no.
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }
}
