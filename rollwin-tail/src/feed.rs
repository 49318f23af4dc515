use std::num::ParseFloatError;
use std::str;
use std::sync::Arc;

use rollwin_core::SynchronizedAccumulator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::FeedError;

/// `None` for blank lines and `#` comments.
pub(crate) fn parse_sample(line: &str) -> Option<Result<f64, ParseFloatError>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    Some(line.parse::<f64>())
}

/// Inserts every sample read from `reader` until end of input, returning how
/// many were accepted. Lines that are not UTF-8 or not numeric are skipped.
pub(crate) async fn feed<R>(window: Arc<SynchronizedAccumulator>, mut reader: R) -> Result<u64, FeedError>
    where
        R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut ingested = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = match str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(bytes = buf.len(), "Skipping sample: {e}");
                continue;
            }
        };

        match parse_sample(line) {
            Some(Ok(value)) => {
                window.insert(value);
                ingested += 1;
            }
            Some(Err(e)) => tracing::warn!(line = %line.trim(), "Skipping sample: {e}"),
            None => {}
        }
    }

    Ok(ingested)
}
