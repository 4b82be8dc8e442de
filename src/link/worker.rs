use anyhow::{bail, Context, Result};
use futures::StreamExt;
use reqwest::header::ACCEPT;
use tokio::time::{self, Duration};
use tokio_util::sync::CancellationToken;

use crate::console::{ConsoleController, InboundEvent};

use super::sse::{SseDecoder, SseFrame};

// Set to false to silence per-frame logging from the rig link
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

const LAST_EVENT_ID: &str = "Last-Event-ID";

/// Stream position carried across reconnects.
#[derive(Debug)]
struct StreamCursor {
    retry: Duration,
    last_event_id: Option<String>,
}

/// Streams `/events` from the rig into the console until cancelled,
/// reconnecting after every disconnect.
pub async fn link_loop(
    events_url: String,
    client: reqwest::Client,
    console: ConsoleController,
    reconnect_delay: Duration,
    cancel_token: CancellationToken,
) {
    let mut cursor = StreamCursor {
        retry: reconnect_delay,
        last_event_id: None,
    };

    loop {
        tokio::select! {
            result = stream_events(&client, &events_url, &console, &mut cursor) => {
                console.notify_link_status(false);
                match result {
                    Ok(()) => log_warn!("Events Disconnected: {} closed the stream", events_url),
                    Err(err) => log_warn!("Events Disconnected: {err:#}"),
                }
            }
            _ = cancel_token.cancelled() => {
                console.notify_link_status(false);
                log_info!("rig link shutting down");
                break;
            }
        }

        tokio::select! {
            _ = time::sleep(cursor.retry) => {}
            _ = cancel_token.cancelled() => {
                log_info!("rig link shutting down");
                break;
            }
        }
    }
}

async fn stream_events(
    client: &reqwest::Client,
    events_url: &str,
    console: &ConsoleController,
    cursor: &mut StreamCursor,
) -> Result<()> {
    let mut request = client.get(events_url).header(ACCEPT, "text/event-stream");
    if let Some(id) = &cursor.last_event_id {
        request = request.header(LAST_EVENT_ID, id.as_str());
    }
    let response = request
        .send()
        .await
        .with_context(|| format!("failed to reach rig at {events_url}"))?;

    if !response.status().is_success() {
        bail!("event stream returned HTTP {}", response.status());
    }

    log_info!("Events Connected: {}", events_url);
    console.notify_link_status(true);

    let mut decoder = SseDecoder::new();
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.context("event stream read failed")?;
        for frame in decoder.push(&chunk) {
            dispatch_frame(console, &frame).await;
        }
        if let Some(hint) = decoder.retry() {
            cursor.retry = hint;
        }
        if let Some(id) = decoder.last_event_id() {
            cursor.last_event_id = Some(id.to_string());
        }
    }

    Ok(())
}

async fn dispatch_frame(console: &ConsoleController, frame: &SseFrame) {
    log_debug!("{} {}", frame.event, frame.data);

    match InboundEvent::parse(&frame.event, &frame.data) {
        Some(event) => {
            console.handle_event(&event).await;
        }
        None => log_debug!("ignored {} event", frame.event),
    }
}
