//! Getting at the program JSON inside generator responses.
//!
//! The generation service returns free text with a JSON block somewhere in
//! it, and its HTTP layer wraps the parsed block as `json_result`, possibly
//! nested under `data.floor_plan` and possibly still as a string.

use std::borrow::Cow;

use serde_json::Value;
use spaceplan_core::ProgramError;
use tracing::{debug, trace};

/// Maximum number of wrapper layers peeled by [`unwrap_envelope`].
const MAX_ENVELOPE_LAYERS: usize = 4;

/// Strip response wrappers until the program object is reached.
///
/// Handles `{"json_result": ...}`, `{"data": {"floor_plan": ...}}` and JSON
/// encoded as a string at any of these levels. Values without a wrapper
/// are returned as they are.
pub fn unwrap_envelope(value: &Value) -> Result<Cow<'_, Value>, ProgramError> {
    let mut current = Cow::Borrowed(value);

    for _ in 0..MAX_ENVELOPE_LAYERS {
        let next = match current.as_ref() {
            Value::String(text) => Some(serde_json::from_str(text)?),
            Value::Object(obj) => {
                if let Some(inner) = obj.get("json_result") {
                    Some(inner.clone())
                } else if let Some(plan) = obj.get("data").and_then(|d| d.get("floor_plan")) {
                    Some(plan.clone())
                } else {
                    None
                }
            }
            _ => None,
        };

        match next {
            Some(inner) => {
                trace!("unwrapped response layer");
                current = Cow::Owned(inner);
            }
            None => break,
        }
    }

    Ok(current)
}

/// Pull the program JSON out of free generator text.
///
/// Tried in order: the first ```` ```json ```` fenced block, any fenced
/// block that parses as JSON (a leading `json` tag is ignored), then the
/// first balanced `{ ... }` span in the text.
pub fn extract_json_block(text: &str) -> Result<Value, ProgramError> {
    let mut first_error = None;

    if let Some((_, rest)) = text.split_once("```json") {
        let block = rest.split("```").next().unwrap_or_default().trim();
        match serde_json::from_str(block) {
            Ok(value) => {
                debug!("extracted JSON from ```json block");
                return Ok(value);
            }
            Err(err) => first_error = Some(err),
        }
    }

    for block in text.split("```").skip(1).step_by(2) {
        let block = block.trim();
        let block = block.strip_prefix("json").unwrap_or(block).trim();
        if let Ok(value) = serde_json::from_str(block) {
            debug!("extracted JSON from fenced block");
            return Ok(value);
        }
    }

    if let Some(span) = first_object_span(text) {
        match serde_json::from_str(span) {
            Ok(value) => {
                debug!("extracted JSON from brace span");
                return Ok(value);
            }
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(ProgramError::InvalidJson(err)),
        None => Err(ProgramError::NoJsonFound),
    }
}

/// The first `{ ... }` span with balanced braces, ignoring braces inside
/// string literals.
fn first_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
