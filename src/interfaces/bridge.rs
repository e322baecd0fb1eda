use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::message::BridgeMessage;
use crate::interfaces::content::{ContentScript, Page};

pub type BridgeSender = mpsc::UnboundedSender<BridgeMessage>;
pub type BridgeReceiver = mpsc::UnboundedReceiver<BridgeMessage>;

pub fn channel() -> (BridgeSender, BridgeReceiver) {
    mpsc::unbounded_channel()
}

/// Applies incoming messages to `script` until every sender is dropped.
pub fn spawn_bridge_listener<P>(
    script: Arc<ContentScript<P>>,
    mut receiver: BridgeReceiver,
) -> JoinHandle<()>
where
    P: Page + 'static,
{
    tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            script.on_message(message);
        }
        debug!(session = %script.session_id(), "Bridge channel closed");
    })
}
