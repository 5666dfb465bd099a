//! Interactive prompts with non-interactive fallback

use super::context::UiContext;
use crate::error::{GoverError, GoverResult};

/// Prompt for selection from a list of options.
///
/// Returns the first option when the terminal is not interactive.
pub async fn select<T: Clone + Send + Eq + 'static>(
    ctx: &UiContext,
    message: &str,
    options: &[(T, &str, &str)], // (value, label, hint)
) -> GoverResult<T> {
    let Some((first, _, _)) = options.first() else {
        return Err(GoverError::User(format!("No options for: {}", message)));
    };
    if !ctx.is_interactive() {
        return Ok(first.clone());
    }

    let message = message.to_string();
    let items: Vec<(T, String, String)> = options
        .iter()
        .map(|(v, l, h)| (v.clone(), l.to_string(), h.to_string()))
        .collect();

    let result = tokio::task::spawn_blocking(move || {
        let mut select = cliclack::select(&message);
        for (value, label, hint) in items {
            select = select.item(value, label, hint);
        }
        select.interact()
    })
    .await;

    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(GoverError::User(format!("Select failed: {}", e))),
        Err(e) => Err(GoverError::User(format!("Select task failed: {}", e))),
    }
}
