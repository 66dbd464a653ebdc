use clap::{Parser, Subcommand};
use log::info;
use std::time::Duration;
use tokio::sync::oneshot;
use traffic_inspector::framework::core::{FakeCaptureConfig, FrameworkError, InspectorConfig};
use traffic_inspector::framework::{
    CaptureRecorder, CaptureSource, EventDetail, EventStore, FakeCapture, LogView, LogWatcher,
    RefreshReason, curl_for_event,
};

#[derive(Parser)]
#[command(name = "traffic-inspector")]
#[command(about = "Inspect captured HTTP traffic: list, search, show details and copy as curl")]
struct Cli {
    /// Number of simulated exchanges to capture
    #[arg(long, default_value_t = 5)]
    count: usize,

    /// Delay between simulated exchanges in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Every n-th simulated exchange fails (0 disables failures)
    #[arg(long, default_value_t = 4)]
    failure_every: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List captured events, optionally filtered by URL
    List {
        /// Case-insensitive URL substring
        #[arg(short, long, default_value = "")]
        search: String,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show headers, bodies and timing of one event
    Show {
        /// Position of the event in capture order
        index: usize,
    },
    /// Print one event's request as a curl command
    Curl {
        /// Position of the event in capture order
        index: usize,
    },
    /// Follow the log live while traffic is being captured
    Watch {
        /// Case-insensitive URL substring
        #[arg(short, long, default_value = "")]
        search: String,

        /// Refresh interval for relative timestamps in milliseconds
        #[arg(long, default_value_t = 1000)]
        refresh_ms: u64,
    },
}

impl Cli {
    fn capture_config(&self) -> FakeCaptureConfig {
        FakeCaptureConfig {
            exchange_count: self.count,
            delay_ms: self.delay_ms,
            failure_every: self.failure_every,
        }
    }
}

async fn capture_all(store: &EventStore, config: FakeCaptureConfig) -> Result<(), FrameworkError> {
    let mut source = FakeCapture::with_config(config);
    let stream = source.run().await?;
    let summary = CaptureRecorder::new(store.clone()).record(stream).await;
    info!("Recorded from {}: {:?}", source.name(), summary);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let capture_config = cli.capture_config();
    capture_config.validate()?;

    let store = EventStore::new();

    match cli.command {
        Commands::List { search, json } => {
            capture_all(&store, capture_config).await?;
            let view = LogView::new(store.clone()).with_search(search);
            let rows = view.rows(None);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (index, row) in rows.iter().enumerate() {
                    println!("{:>3}  {}", index, row);
                }
                println!();
                println!("{}", store.stats());
            }
        }
        Commands::Show { index } => {
            capture_all(&store, capture_config).await?;
            let event = store
                .nth(index)
                .ok_or_else(|| format!("No captured event at index {}", index))?;
            print!("{}", EventDetail::from_event(&event, None));
        }
        Commands::Curl { index } => {
            capture_all(&store, capture_config).await?;
            let event = store
                .nth(index)
                .ok_or_else(|| format!("No captured event at index {}", index))?;
            let command = curl_for_event(&event)
                .ok_or_else(|| format!("Event {} has no request to export", event.id))?;
            println!("{}", command);
        }
        Commands::Watch { search, refresh_ms } => {
            let config = InspectorConfig {
                search,
                refresh_interval: Duration::from_millis(refresh_ms),
            };
            let watcher = LogWatcher::new(LogView::new(store.clone()), config.clone())?;
            let changes = store.subscribe();
            let (shutdown_tx, shutdown_rx) = oneshot::channel();

            let capture_store = store.clone();
            let linger = config.refresh_interval;
            let capture = tokio::spawn(async move {
                let result = capture_all(&capture_store, capture_config).await;
                // one more refresh so the final state is visible
                tokio::time::sleep(linger).await;
                let _ = shutdown_tx.send(());
                result
            });

            watcher
                .run(changes, shutdown_rx, |reason, rows| {
                    let label = match reason {
                        RefreshReason::Initial => "start".to_string(),
                        RefreshReason::Changed(change) => format!("{:?}", change),
                        RefreshReason::Tick => "tick".to_string(),
                    };
                    println!("--- {} ({} events)", label, rows.len());
                    for row in rows {
                        println!("  {}", row);
                    }
                })
                .await;

            capture.await??;
            println!("{}", store.stats());
        }
    }

    Ok(())
}
