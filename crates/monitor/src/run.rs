//! Run — the monitor loop: sync, read, decode, band, filter, print.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tokio::io::AsyncRead;
use tracing::{debug, info, warn};

use decoder::filter::PassFilter;
use decoder::frame::{decode, read_frame, sync, DecodedEvent};
use decoder::render::{format_line, format_message};
use decoder::session::Session;
use decoder::token::{load_tables, TokenRecord, TokenTable};

use crate::banner;
use crate::conf::MonitorConfig;
use crate::term::{self, TermCaps};

/// Drive one monitor session over an already-open byte source.
///
/// Single logical pipeline, no queuing: read one frame, decode it, render
/// it, print it. Ctrl-C is honored at the two suspension points (the sync
/// wait and the frame read); either way the summary banner still prints.
pub async fn run<R>(config: &MonitorConfig, caps: TermCaps, source: &mut R) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut table = Arc::new(
        load_tables(&config.token_files).context("Failed to load token definition files")?,
    );
    info!("Loaded {} tokens from {:?}", table.len(), config.token_files);

    let filter = PassFilter::new(&config.pass_filter)?;
    let mut session = Session::new(Local::now());

    print!("Waiting for device initialization...");
    let _ = std::io::stdout().flush();

    let synced = tokio::select! {
        result = sync(source) => {
            result.context("serial read failed during sync")?;
            println!("done.");
            true
        }
        _ = tokio::signal::ctrl_c() => {
            println!("cancelled.");
            false
        }
    };

    if synced {
        session.reset_timing(Local::now());
        banner::start(
            &config.token_files,
            table.len(),
            &config.device,
            &config.pass_filter,
            session.start_time(),
        );

        loop {
            let frame = tokio::select! {
                result = read_frame(source) => result.context("serial read failed")?,
                _ = tokio::signal::ctrl_c() => {
                    warn!("interrupted, shutting down");
                    break;
                }
            };
            let now = Local::now();

            match decode(frame, &table) {
                DecodedEvent::ReloadSignal => {
                    // The control frame itself renders nothing; it swaps the
                    // table wholesale and restarts the band clock.
                    table = Arc::new(
                        load_tables(&config.token_files)
                            .context("Failed to reload token definition files")?,
                    );
                    session.reset_timing(Local::now());
                    banner::reload(&config.token_files, table.len(), session.start_time());
                }
                DecodedEvent::Resolved { record, param, flags } => {
                    emit(&mut session, &filter, caps, &table, &record, param, flags, now);
                }
                DecodedEvent::Unknown { token_id, param_word } => {
                    let record = TokenRecord::undefined(token_id, param_word);
                    emit(&mut session, &filter, caps, &table, &record, 0, 0, now);
                }
            }
        }
    }

    let (scanned, matched) = filter.stats();
    debug!(scanned, matched, "pass filter statistics");
    banner::summary(
        session.severity_counts(),
        session.filtered(),
        session.start_time(),
        Local::now(),
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn emit(
    session: &mut Session,
    filter: &PassFilter,
    caps: TermCaps,
    table: &TokenTable,
    record: &TokenRecord,
    param: u32,
    flags: u8,
    now: DateTime<Local>,
) {
    let message = format_message(record, table, param);
    let line = format_line(session.seq(), record, &message, flags);
    // the band anchor advances even when the filter then drops the line
    let banded = format!("{}{}", session.band_column(now), line);

    if !filter.accept(&banded) {
        session.record_filtered();
        return;
    }

    term::print_line(caps, &record.severity, &banded);
    session.record_printed(&record.severity);
}
