// src/reload.rs

//! Reload signalling between build tasks and the dev server.
//!
//! Tasks publish a [`ReloadEvent`] after writing output; the dev server
//! subscribes and pushes a frame to every connected browser client. The
//! channel is fire-and-forget: publishing never blocks, and send errors
//! (no server running, e.g. in one-shot builds) are ignored by the caller.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::config::AssetClass;

/// Broadcast payload describing what was rebuilt.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadEvent {
    pub class: AssetClass,
    /// Output paths written by the task, relative to the project root.
    pub paths: Vec<String>,
}

pub type ReloadSender = broadcast::Sender<ReloadEvent>;
pub type ReloadReceiver = broadcast::Receiver<ReloadEvent>;

/// Create the reload channel.
///
/// The capacity only bounds how far a slow client may lag before it misses
/// events; a lagging browser just reloads on the next frame.
pub fn channel() -> ReloadSender {
    let (tx, _rx) = broadcast::channel(32);
    tx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_frame_uses_snake_case_class_names() {
        let event = ReloadEvent {
            class: AssetClass::MinCss,
            paths: vec!["assets/build/css/vendor.min.css".into()],
        };

        let json = serde_json::to_string(&event).expect("event serializes");
        assert!(json.contains(r#""class":"min_css""#), "frame: {json}");
        assert!(json.contains("vendor.min.css"), "frame: {json}");
    }
}
