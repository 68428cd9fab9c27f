//! The program and arguments handed to the process runner.

use std::path::PathBuf;

/// A fully built client invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    /// Client program name, e.g. `rdesktop`
    pub program: String,
    /// Resolved executable path
    pub executable: PathBuf,
    /// Arguments, not including the program name
    pub args: Vec<String>,
    /// Arguments carrying a secret, as (index, flag shown in its place)
    sensitive: Vec<(usize, &'static str)>,
}

impl LaunchCommand {
    /// Creates a command for a program found at `executable`
    #[must_use]
    pub fn new(program: impl Into<String>, executable: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            executable: executable.into(),
            args,
            sensitive: Vec::new(),
        }
    }

    /// Marks `args[index]` as secret; logs show `flag` followed by `****`
    #[must_use]
    pub fn with_sensitive(mut self, index: usize, flag: &'static str) -> Self {
        if index < self.args.len() {
            self.sensitive.push((index, flag));
        }
        self
    }

    /// Returns true if `args[index]` is masked in logs
    #[must_use]
    pub fn is_sensitive(&self, index: usize) -> bool {
        self.sensitive.iter().any(|&(i, _)| i == index)
    }

    /// Formats the command for logs and previews, with password values masked
    #[must_use]
    pub fn display_for_log(&self) -> String {
        let mut parts = vec![self.program.clone()];
        for (index, arg) in self.args.iter().enumerate() {
            match self.sensitive.iter().find(|&&(i, _)| i == index) {
                Some((_, flag)) => parts.push(format!("{flag}****")),
                None => parts.push(arg.clone()),
            }
        }
        parts.join(" ")
    }
}
