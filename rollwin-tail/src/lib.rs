use std::sync::Arc;
use std::time::Duration;

use rollwin_core::SynchronizedAccumulator;
use tokio::io::{self, AsyncBufRead, AsyncWrite, BufReader};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::FeedError;
use crate::feed::feed;
use crate::report::WindowReport;
use crate::settings::Settings;

pub mod error;
mod feed;
pub mod report;
pub mod settings;

/// Tails samples from stdin and writes JSON reports to stdout.
pub async fn run(settings: &Arc<Settings>) -> Result<WindowReport, FeedError> {
    tail(settings, BufReader::new(io::stdin()), io::stdout()).await
}

/// Feeds `reader` into a shared window from a spawned task while reporting on
/// every interval tick. A final report is written once the input ends.
pub async fn tail<R, W>(settings: &Settings, reader: R, mut writer: W) -> Result<WindowReport, FeedError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
{
    let window = Arc::new(SynchronizedAccumulator::new(settings.window.capacity));
    let policy = settings.window.weight;

    let period = Duration::from_millis(settings.report.interval_ms.max(1));
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(capacity = window.capacity(), weight = ?policy, "Tailing samples");

    let mut producer = Producer(tokio::spawn(feed(window.clone(), reader)));

    let ingested = loop {
        tokio::select! {
            joined = &mut producer.0 => break joined??,
            _ = interval.tick() => {
                let report = WindowReport::capture(&window, policy);
                tracing::debug!(?report, "Window report");
                report.write_to(&mut writer).await?;
            }
        }
    };

    tracing::info!(ingested, "Sample stream closed");

    let report = WindowReport::capture(&window, policy);
    report.write_to(&mut writer).await?;

    Ok(report)
}

/// Aborts the feeding task when `tail` returns early or is dropped, so the
/// reader is never left draining into an unobserved window.
struct Producer(JoinHandle<Result<u64, FeedError>>);

impl Drop for Producer {
    fn drop(&mut self) {
        self.0.abort();
    }
}
