//! System preamble loading and prompt assembly.

use std::env;
use std::path::Path;

use relay_core::RouteSummary;
use tracing::info;

/// Default path for the system prompt file.
pub const DEFAULT_PROMPT_FILE: &str = "SYSTEM_PROMPT.md";

/// Embedded system preamble (used when no override is configured).
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Waypoint, a friendly travel assistant. \
Answer the user's latest message concisely, using the recent conversation for context. \
When a last route is given, treat it as the trip the user is currently discussing. \
If the user wants a route computed, tell them to ask with the word \"travel\", for example \
\"travel from Paris to Berlin\".";

/// Reply used when a general turn cannot be generated.
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't come up with an answer just now. Could you rephrase your message?";

/// Load the system preamble.
///
/// Priority:
/// 1. `WAYPOINT_SYSTEM_PROMPT` env var (if set)
/// 2. Contents of prompt file (`WAYPOINT_PROMPT_FILE` or default `SYSTEM_PROMPT.md`)
/// 3. Embedded default prompt
pub fn load_system_prompt() -> String {
    if let Ok(prompt) = env::var("WAYPOINT_SYSTEM_PROMPT") {
        if !prompt.trim().is_empty() {
            info!("Using system prompt from WAYPOINT_SYSTEM_PROMPT env var");
            return prompt;
        }
    }

    let prompt_file =
        env::var("WAYPOINT_PROMPT_FILE").unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());

    if let Some(prompt) = load_prompt_file(&prompt_file) {
        info!("Loaded system prompt from {}", prompt_file);
        return prompt;
    }

    info!("Using embedded default system prompt");
    DEFAULT_SYSTEM_PROMPT.to_string()
}

/// Read a prompt file, ignoring missing or blank files.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Assemble the prompt for a general turn.
///
/// Layout: preamble, blank line, recent transcript, an optional
/// `LastRoute:` hint, then the current user message.
pub fn build_general_prompt(
    preamble: &str,
    transcript: &str,
    last_route: Option<&RouteSummary>,
    message: &str,
) -> String {
    let mut prompt = String::with_capacity(preamble.len() + transcript.len() + message.len() + 64);

    prompt.push_str(preamble);
    prompt.push_str("\n\nConversation so far:\n");
    prompt.push_str(transcript);

    if let Some(route) = last_route {
        prompt.push_str("\n\nLastRoute: ");
        prompt.push_str(&route.hint());
    }

    prompt.push_str("\n\nUser message: ");
    prompt.push_str(message);
    prompt
}

/// Prompt asking the model to pull both route endpoints out of a message.
pub fn build_extraction_prompt(message: &str) -> String {
    format!(
        "Extract the trip origin and destination from the message below. \
Respond with a single JSON object of the form {{\"origin\": \"...\", \"destination\": \"...\"}}. \
Use an empty string for any endpoint the message does not name. \
Keep place names exactly as written, or as \"longitude,latitude\" when given as coordinates.\n\n\
Message: {}",
        message
    )
}
