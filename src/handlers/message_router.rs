use crate::error::ChatError;
use crate::models::{Event, Routed};
use crate::{parsing, render, utils};
use tracing::debug;

/// Decides what the stream owned by `stream_user` does with one event.
///
/// `Ok(None)` means a subscription control event with nothing to do.
/// A `/quit` that targets someone else is not treated as a quit; it goes
/// through the payload split like any message and usually fails there.
pub fn handle_message(event: &Event, stream_user: &str) -> Result<Option<Routed>, ChatError> {
    if event.is_subscribe() {
        return Ok(None);
    }

    let text = utils::html_encode(&parsing::coerce_data(&event.data));

    if parsing::quit_target(&text) == Some(stream_user) {
        debug!(stream_user, "Quit requested for stream");
        return Ok(Some(Routed::Quit));
    }

    let (author, body) = parsing::split_payload(&text)?;
    let formatted = render::generate_html(body, author);
    let mine = author == stream_user;

    debug!(author, style = %formatted.style, mine, "Routed message");

    Ok(Some(Routed::Message {
        html: formatted.html,
        mine,
    }))
}
