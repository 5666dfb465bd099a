//! Line-oriented status output

use super::context::UiContext;
use console::style;

/// A completed step
pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(message).ok();
    } else {
        println!("{} {}", style("[OK]").green(), message);
    }
}

/// Informational notice
pub fn step_info(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::info(message).ok();
    } else {
        println!("{} {}", style("[INFO]").cyan(), message);
    }
}

/// Non-fatal problem
pub fn step_warn(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(message).ok();
    } else {
        println!("{} {}", style("[WARN]").yellow(), message);
    }
}

/// Follow-up hint shown under a step
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Heading for a block of listed items
pub fn section(title: &str) {
    println!("{}", style(title).bold());
}

/// One entry of a listing, with optional dimmed labels
pub fn list_item(name: &str, labels: &[&str]) {
    if labels.is_empty() {
        println!("  {}", name);
    } else {
        println!("  {} {}", name, style(format!("[{}]", labels.join(", "))).dim());
    }
}
