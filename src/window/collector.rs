// Window collection: cutting an entry stream into isolated per-window batches
//
// Replay input is bucketed by timestamp; live input is cut on a wall-clock
// deadline. Each window gets a fresh Vec, so entries arriving for window N+1
// never leak into window N.
use std::path::Path;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use super::{WindowEntry, WindowProcessor, WindowReport};
use crate::error::{HeatError, Result};

/// One window of a replayed input file
#[derive(Debug, Clone)]
pub struct ReplayWindow {
    /// Timestamp at which the window opens
    pub start: i64,
    pub entries: Vec<WindowEntry>,
}

/// Entries gathered by one live collection cycle
#[derive(Debug, Default)]
pub struct CollectedWindow {
    pub entries: Vec<WindowEntry>,
    /// The sender side is gone; no further windows will follow
    pub closed: bool,
}

/// Parse one JSON line into an entry; blank lines yield `None`
pub fn parse_entry_line(line_no: usize, line: &str) -> Result<Option<WindowEntry>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| HeatError::Input {
            line: line_no,
            message: e.to_string(),
        })
}

/// Read a JSON-lines file of entries, skipping malformed lines with a warning
pub fn read_entries(path: &Path) -> Result<Vec<WindowEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| HeatError::Io {
        source: e,
        context: format!("Failed to read input file: {:?}", path),
    })?;

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for (i, line) in content.lines().enumerate() {
        match parse_entry_line(i + 1, line) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Skipping entry: {}", e);
                skipped += 1;
            }
        }
    }

    tracing::debug!(
        "Read {} entries from {:?} ({} skipped)",
        entries.len(),
        path,
        skipped
    );
    Ok(entries)
}

/// Group entries into consecutive windows of `length_seconds` by timestamp
///
/// Windows are aligned to the earliest timestamp. Entries keep their input
/// order within a window and empty windows are not produced.
pub fn split_into_windows(mut entries: Vec<WindowEntry>, length_seconds: u64) -> Vec<ReplayWindow> {
    if entries.is_empty() {
        return Vec::new();
    }
    entries.sort_by_key(|e| e.timestamp);

    // Bucket math in i128 so timestamps spanning the whole i64 range cannot overflow
    let length = i128::from(length_seconds.max(1));
    let origin = i128::from(entries[0].timestamp);

    let mut windows: Vec<ReplayWindow> = Vec::new();
    let mut current_index = None;
    for entry in entries {
        let index = (i128::from(entry.timestamp) - origin) / length;
        if current_index != Some(index) {
            current_index = Some(index);
            // Lies between origin and this timestamp, so it fits in i64
            let start = (origin + index * length) as i64;
            windows.push(ReplayWindow {
                start,
                entries: Vec::new(),
            });
        }
        if let Some(window) = windows.last_mut() {
            window.entries.push(entry);
        }
    }
    windows
}

/// Collect entries until `length` elapses or the channel closes
pub async fn collect_window(
    rx: &mut mpsc::Receiver<WindowEntry>,
    length: Duration,
) -> CollectedWindow {
    let deadline = time::sleep_until(Instant::now() + length);
    tokio::pin!(deadline);

    let mut entries = Vec::new();
    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Some(entry) => entries.push(entry),
                None => return CollectedWindow { entries, closed: true },
            },

            _ = &mut deadline => {
                return CollectedWindow { entries, closed: false };
            }
        }
    }
}

/// Forward JSON-lines entries from `reader` into `tx` on a background task
///
/// Malformed lines are logged and skipped. The task ends at EOF, on a read
/// error, or when the receiver is dropped, and returns the number forwarded.
pub fn spawn_line_reader<R>(reader: R, tx: mpsc::Sender<WindowEntry>) -> JoinHandle<usize>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = reader.lines();
        let mut line_no = 0usize;
        let mut forwarded = 0usize;

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            };
            line_no += 1;

            match parse_entry_line(line_no, &line) {
                Ok(Some(entry)) => {
                    if tx.send(entry).await.is_err() {
                        tracing::debug!("Collector gone, stopping reader");
                        break;
                    }
                    forwarded += 1;
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping entry: {}", e),
            }
        }

        tracing::debug!("Reader finished: {} entries forwarded", forwarded);
        forwarded
    })
}

/// Run window cycles over a live channel until it closes
///
/// Every cut window is processed and handed to `emit`, including empty ones;
/// the final partial window is drained when the channel closes. Returns the
/// number of windows emitted.
pub async fn run_windows<F>(
    mut rx: mpsc::Receiver<WindowEntry>,
    length: Duration,
    processor: &mut WindowProcessor,
    mut emit: F,
) -> usize
where
    F: FnMut(usize, WindowReport),
{
    let mut emitted = 0usize;
    loop {
        let window = collect_window(&mut rx, length).await;
        let closed = window.closed;

        // A closed channel with nothing pending ends the run without an empty tail window
        if !(closed && window.entries.is_empty()) {
            let report = processor.process(window.entries);
            emit(emitted, report);
            emitted += 1;
        }

        if closed {
            tracing::info!("Input closed after {} windows", emitted);
            return emitted;
        }
    }
}
