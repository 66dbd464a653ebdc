use std::pin::Pin;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::Stream;

/// Notification that the store snapshot changed and should be re-read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Appended(String),
    Settled(String),
    Cleared,
}

pub type ChangeStream = Pin<Box<dyn Stream<Item = StoreChange> + Send>>;
pub type ChangeSender = mpsc::UnboundedSender<StoreChange>;
pub type ChangeReceiver = mpsc::UnboundedReceiver<StoreChange>;

pub fn create_change_channel() -> (ChangeSender, ChangeReceiver) {
    mpsc::unbounded_channel()
}

pub fn receiver_to_stream(receiver: ChangeReceiver) -> ChangeStream {
    Box::pin(UnboundedReceiverStream::new(receiver))
}

/// Fans store changes out to every live subscriber.
///
/// Cloning shares the subscriber list. Subscribers whose receiving side has
/// been dropped are pruned on the next broadcast.
#[derive(Clone, Default)]
pub struct ChangeBroadcaster {
    senders: Arc<Mutex<Vec<ChangeSender>>>,
}

impl ChangeBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> ChangeStream {
        let (tx, rx) = create_change_channel();
        self.lock().push(tx);
        receiver_to_stream(rx)
    }

    /// Returns the number of subscribers the change was delivered to
    pub fn broadcast(&self, change: StoreChange) -> usize {
        let mut senders = self.lock();
        senders.retain(|sender| sender.send(change.clone()).is_ok());
        senders.len()
    }

    pub fn subscriber_count(&self) -> usize {
        let mut senders = self.lock();
        senders.retain(|sender| !sender.is_closed());
        senders.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ChangeSender>> {
        self.senders.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
