//! Spinners and toolchain build progress with CI fallback

use super::context::UiContext;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Stage lines printed by `make.bash` on recent toolchains
const EXPECTED_BUILD_STAGES: u64 = 6;

/// A task spinner with CI fallback
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    /// Stop with success message
    pub fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        } else {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    /// Stop with error message
    pub fn stop_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        } else {
            println!("{} {}", style("[FAIL]").red(), message);
        }
    }
}

/// Progress display for one toolchain build.
///
/// In interactive mode the `Building ...` stage lines of the build script
/// advance a progress bar and other lines are shown as its message. In CI
/// every line is printed as is.
pub struct BuildProgress {
    bar: Option<ProgressBar>,
}

impl BuildProgress {
    pub fn new(ctx: &UiContext, label: &str) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(EXPECTED_BUILD_STAGES);
            if let Ok(bar_style) = ProgressStyle::default_bar().template(
                "  {spinner:.cyan} Building {prefix}  {bar:20.cyan/dim} {pos}/{len} {msg:.dim}  {elapsed:.dim}",
            ) {
                bar.set_style(
                    bar_style
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                        .progress_chars("━╸─"),
                );
            }
            bar.set_prefix(label.to_string());
            bar.enable_steady_tick(std::time::Duration::from_millis(120));
            Some(bar)
        } else {
            println!("Building {}...", label);
            None
        };
        Self { bar }
    }

    /// Handle one line of build output
    pub fn on_line(&self, line: String) {
        let Some(ref bar) = self.bar else {
            println!("{}", line);
            return;
        };

        if let Some(stage) = parse_stage_line(&line) {
            let next = bar.position() + 1;
            if next > bar.length().unwrap_or(0) {
                bar.set_length(next);
            }
            bar.set_position(next);
            bar.set_message(truncate(stage, 60));
        } else {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                bar.set_message(truncate(trimmed, 60));
            }
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

/// Extract the stage description from a `Building ...` line
fn parse_stage_line(line: &str) -> Option<&str> {
    let stage = line.strip_prefix("Building ")?.trim();
    (!stage.is_empty()).then_some(stage)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_non_interactive() {
        let ctx = UiContext::non_interactive();
        let mut spinner = TaskSpinner::new(&ctx);
        spinner.start("Fetching...");
        spinner.stop("Done");
        spinner.start("Fetching...");
        spinner.stop_error("Failed");
    }

    #[test]
    fn parse_stage_lines() {
        assert_eq!(
            parse_stage_line("Building Go cmd/dist using /usr/lib/go. (go1.22.6 linux/amd64)"),
            Some("Go cmd/dist using /usr/lib/go. (go1.22.6 linux/amd64)")
        );
        assert_eq!(
            parse_stage_line("Building packages and commands for linux/amd64."),
            Some("packages and commands for linux/amd64.")
        );
        assert!(parse_stage_line("Building ").is_none());
        assert!(parse_stage_line("cmd/compile").is_none());
        assert!(parse_stage_line("").is_none());
    }

    #[test]
    fn truncate_long_messages() {
        assert_eq!(truncate("short", 60), "short");
        let long = "x".repeat(80);
        let cut = truncate(&long, 60);
        assert_eq!(cut.chars().count(), 60);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn build_progress_non_interactive() {
        let ctx = UiContext::non_interactive();
        let progress = BuildProgress::new(&ctx, "go1.22.6");
        progress.on_line("Building Go toolchain1 using /usr/lib/go.".to_string());
        progress.on_line("ALL TESTS PASSED".to_string());
        progress.finish();
    }
}
