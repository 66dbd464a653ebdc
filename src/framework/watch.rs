use crate::framework::core::{ChangeStream, ConfigError, InspectorConfig, StoreChange};
use crate::framework::view::{LogRow, LogView};
use futures::stream::StreamExt;
use log::{debug, info};
use tokio::sync::oneshot;
use tokio::time::{interval, MissedTickBehavior};

/// Why the watcher produced a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshReason {
    Initial,
    Changed(StoreChange),
    Tick,
}

/// Re-renders the visible rows whenever the store changes and on every
/// refresh tick, so relative ages keep moving while nothing new arrives.
pub struct LogWatcher {
    view: LogView,
    config: InspectorConfig,
}

impl LogWatcher {
    /// The view's search is replaced by `config.search`
    pub fn new(mut view: LogView, config: InspectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        view.set_search(config.search.clone());
        Ok(Self { view, config })
    }

    pub fn view(&self) -> &LogView {
        &self.view
    }

    /// Run until `shutdown` fires or the change stream ends. `render` receives
    /// every frame; the number of frames rendered is returned.
    pub async fn run<F>(
        &self,
        mut changes: ChangeStream,
        mut shutdown: oneshot::Receiver<()>,
        mut render: F,
    ) -> usize
    where
        F: FnMut(RefreshReason, &[LogRow]),
    {
        let mut ticker = interval(self.config.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately
        ticker.tick().await;

        render(RefreshReason::Initial, &self.view.rows(None));
        let mut frames = 1;

        loop {
            let reason = tokio::select! {
                _ = &mut shutdown => {
                    info!("LogWatcher: shutdown requested");
                    break;
                }
                change = changes.next() => match change {
                    Some(change) => RefreshReason::Changed(change),
                    None => {
                        debug!("LogWatcher: change stream closed");
                        break;
                    }
                },
                _ = ticker.tick() => RefreshReason::Tick,
            };

            render(reason, &self.view.rows(None));
            frames += 1;
        }

        frames
    }
}
