use crate::domain::ports::{ChangeNotifier, SlotChange};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

/// In-process fan-out of slot changes. A subscriber that falls behind
/// the channel capacity observes a lag error and simply picks up at the
/// next event; listeners re-read state from storage anyway.
pub struct BroadcastNotifier {
    sender: broadcast::Sender<SlotChange>,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier for BroadcastNotifier {
    fn publish(&self, change: SlotChange) {
        // Err means there is no live subscriber.
        let _ = self.sender.send(change);
    }

    fn subscribe(&self) -> broadcast::Receiver<SlotChange> {
        self.sender.subscribe()
    }
}
