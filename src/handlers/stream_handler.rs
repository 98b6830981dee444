use super::message_router::handle_message;
use crate::channel::Subscription;
use crate::models::Routed;
use crate::store::ChatLog;
use anyhow::{anyhow, Result};
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub trait StreamSink: Send {
    fn deliver(&mut self, html: String) -> impl Future<Output = Result<()>> + Send;
}

impl StreamSink for mpsc::Sender<String> {
    fn deliver(&mut self, html: String) -> impl Future<Output = Result<()>> + Send {
        async move {
            self.send(html)
                .await
                .map_err(|_| anyhow!("stream receiver dropped"))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    Quit,
    Disconnected,
    Closed,
}

/// Only the stream owned by a message's author appends it to the log.
pub async fn run_stream<S: StreamSink>(
    mut subscription: Subscription,
    stream_user: &str,
    log: &ChatLog,
    sink: &mut S,
) -> StreamEnd {
    info!(stream_user, "Stream opened");

    while let Some(event) = subscription.next().await {
        match handle_message(&event, stream_user) {
            Ok(None) => continue,
            Ok(Some(Routed::Quit)) => {
                info!(stream_user, "Stream closed by quit");
                return StreamEnd::Quit;
            }
            Ok(Some(Routed::Message { html, mine })) => {
                if mine {
                    log.append(stream_user, &html).await;
                }
                if let Err(err) = sink.deliver(html).await {
                    debug!(stream_user, "Sink closed: {err:?}");
                    return StreamEnd::Disconnected;
                }
            }
            Err(err) => {
                warn!(stream_user, "Dropping message: {err}");
            }
        }
    }

    info!(stream_user, "Channel closed, ending stream");
    StreamEnd::Closed
}
