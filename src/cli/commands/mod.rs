//! CLI command implementations

pub mod cache;
pub mod completions;
pub mod default;
pub mod fetch;
pub mod list;
pub mod pin;
pub mod run;

pub use cache::{cache, uncache};
pub use completions::execute as completions;
pub use default::execute as default_version;
pub use fetch::execute as fetch;
pub use list::execute as list;
pub use pin::{pin, unpin};
pub use run::execute as run;
