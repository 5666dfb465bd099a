//! Detects whether output goes to an interactive terminal

use std::io::IsTerminal;

/// Environment variables set by common CI systems
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
];

/// Decides between fancy (spinners, prompts) and plain output
#[derive(Debug, Clone, Copy)]
pub struct UiContext {
    interactive: bool,
}

impl UiContext {
    /// Inspect the terminal and environment of this process
    pub fn detect() -> Self {
        let tty = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        Self {
            interactive: tty && !running_in_ci(|var| std::env::var_os(var).is_some()),
        }
    }

    /// Plain output, no prompts
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    /// Whether the user can answer prompts
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether spinners and progress bars should be drawn
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}

fn running_in_ci(is_set: impl Fn(&str) -> bool) -> bool {
    CI_VARS.iter().any(|var| is_set(var))
}
