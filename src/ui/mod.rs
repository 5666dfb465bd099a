//! Terminal output for gover
//!
//! Uses `cliclack` spinners and prompts and an `indicatif` bar for
//! toolchain builds, falling back to plain lines when stdout is not an
//! interactive terminal or a CI system is detected.

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{list_item, remark, section, step_info, step_ok, step_warn};
pub use progress::{BuildProgress, TaskSpinner};
pub use prompts::select;
