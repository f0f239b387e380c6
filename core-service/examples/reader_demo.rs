//! Speed reader demonstration
//!
//! Loads a UTF-8 text file (or a built-in sentence), then plays it to the
//! terminal one block at a time.
//!
//! Run with:
//! ```bash
//! # Built-in sentence, 3 words per block, 3 blocks per second
//! cargo run -p core-service --example reader_demo
//!
//! # Your own file, 2 words per block, 6 blocks per second
//! cargo run -p core-service --example reader_demo -- notes.txt 2 6
//! ```

use std::env;
use std::sync::Arc;

use anyhow::Context;
use bridge_traits::extraction::PlainTextExtractor;
use bridge_traits::time::LogLevel;
use core_runtime::config::ReaderConfig;
use core_runtime::events::{CoreEvent, PlaybackEvent};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_service::ReaderService;
use tracing::info;

const SAMPLE: &str = "the quick brown fox jumps over the lazy dog";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(LogLevel::Info),
    )?;

    let args: Vec<String> = env::args().collect();
    let block_size = args
        .get(2)
        .map(|raw| raw.parse())
        .transpose()
        .context("block size must be a number")?
        .unwrap_or(3);
    let rate = args
        .get(3)
        .map(|raw| raw.parse())
        .transpose()
        .context("rate must be a number")?
        .unwrap_or(3);

    let config = ReaderConfig::builder()
        .block_size(block_size)
        .rate(rate)
        .build()?;
    let reader = ReaderService::new(config).with_extractor(Arc::new(PlainTextExtractor));
    let mut events = reader
        .subscribe()
        .filter(|event| matches!(event, CoreEvent::Playback(_)));

    let report = match args.get(1) {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read {}", path))?;
            reader.load_document(bytes).await?
        }
        None => reader.load_text(SAMPLE, 0),
    };
    info!(
        words = report.stats.word_count,
        blocks = report.stats.block_count,
        "Ready"
    );

    if let Some(warning) = report.warning {
        println!("{}", warning);
        return Ok(());
    }

    if let Some(block) = reader.current_block() {
        println!("{}", block);
    }
    if reader.total_blocks() < 2 {
        return Ok(());
    }
    reader.play();

    loop {
        match events.recv().await? {
            CoreEvent::Playback(PlaybackEvent::PositionChanged { .. }) => {
                if let Some(block) = reader.current_block() {
                    println!("{}", block);
                }
            }
            CoreEvent::Playback(PlaybackEvent::Finished { .. }) => break,
            _ => {}
        }
    }

    info!(progress = reader.progress_fraction(), "Finished");
    Ok(())
}
