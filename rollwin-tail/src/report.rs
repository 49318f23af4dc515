use rollwin_core::{Accumulator, SynchronizedAccumulator, WeightPolicy};
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::FeedError;

/// Statistics of one window snapshot. Non-finite values encode as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReport {
    pub count: usize,
    pub capacity: usize,
    pub sum: f64,
    pub mean: f64,
    pub weighted_mean: f64,
    pub weight: WeightPolicy,
}

impl WindowReport {
    pub fn capture(window: &SynchronizedAccumulator, weight: WeightPolicy) -> Self {
        let snapshot = window.snapshot();

        Self {
            count: snapshot.count(),
            capacity: snapshot.capacity(),
            sum: snapshot.sum(),
            mean: snapshot.mean(),
            weighted_mean: snapshot.weighted_mean(weight.weight()),
            weight,
        }
    }

    pub async fn write_to<W>(&self, writer: &mut W) -> Result<(), FeedError>
        where
            W: AsyncWrite + Unpin,
    {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');

        writer.write_all(&line).await?;
        writer.flush().await?;

        Ok(())
    }
}
