use crate::error::ChatError;
use crate::utils::char_tail;
use serde_json::Value;

/// Separates the author from the body in a wire payload.
pub const PAYLOAD_SEPARATOR: &str = "}|{";

const QUIT_PREFIX: &str = "/quit";

/// `null` becomes empty; non-string values use their JSON text.
pub fn coerce_data(data: &Value) -> String {
    match data {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Splits `author}|{body`.
///
/// Only the segment between the first and second separator is kept as the
/// body; anything after a second separator is dropped.
pub fn split_payload(text: &str) -> Result<(&str, &str), ChatError> {
    let mut parts = text.split(PAYLOAD_SEPARATOR);
    let author = parts.next().unwrap_or_default();
    let body = parts.next().ok_or_else(|| ChatError::MalformedPayload {
        payload: text.to_string(),
    })?;
    Ok((author, body))
}

/// If `text` is a quit command, returns the user it targets.
///
/// The target starts at character 6, so the single character after `/quit`
/// is skipped whatever it is.
pub fn quit_target(text: &str) -> Option<&str> {
    if text.starts_with(QUIT_PREFIX) {
        Some(char_tail(text, QUIT_PREFIX.len() + 1))
    } else {
        None
    }
}

/// Users are escaped before the origin match, so a name with `<` or `>`
/// could never match its own stream.
pub fn validate_user(user: &str) -> Result<(), ChatError> {
    if user.is_empty() {
        return Err(ChatError::EmptyUser);
    }
    if user.contains(PAYLOAD_SEPARATOR) || user.contains(['<', '>']) {
        return Err(ChatError::InvalidUser);
    }
    Ok(())
}

pub fn validate_text(text: &str) -> Result<(), ChatError> {
    if text.contains(PAYLOAD_SEPARATOR) {
        return Err(ChatError::InvalidText);
    }
    Ok(())
}

pub fn encode_payload(user: &str, text: &str) -> String {
    format!("{}{}{}", user, PAYLOAD_SEPARATOR, text)
}

pub fn quit_command(user: &str) -> String {
    format!("{} {}", QUIT_PREFIX, user)
}
