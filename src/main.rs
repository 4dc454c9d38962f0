//! modes-decode: decode Mode S / ADS-B frames given as hex lines
//!
//! Lines are read on a tokio runtime, decoded on a pool of worker threads
//! and printed in input order.

mod config;
mod stats;

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded};
use parking_lot::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use modes_decode::ModesMessage;

use crate::config::Config;
use crate::stats::DecodeStats;

/// A line to decode, tagged with its position in the input.
type Job = (u64, String);
/// Rendered output for one input line.
type Rendered = (u64, String);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_args();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    debug!("Configuration: {:?}", config);

    let stats = Arc::new(Mutex::new(DecodeStats::new()));
    let workers = config.worker_count();

    let (job_tx, job_rx): (Sender<Job>, Receiver<Job>) = bounded(1024);
    let (out_tx, out_rx): (Sender<Rendered>, Receiver<Rendered>) = bounded(1024);

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let rx = job_rx.clone();
        let tx = out_tx.clone();
        let stats = Arc::clone(&stats);
        let cfg = config.clone();
        handles.push(thread::spawn(move || decode_worker(rx, tx, stats, cfg)));
    }
    drop(job_rx);
    drop(out_tx);

    let printer = thread::spawn(move || print_in_order(out_rx));

    let rt = tokio::runtime::Runtime::new()?;
    let read_result = rt.block_on(async {
        if config.reads_stdin() {
            info!("Reading from stdin");
            read_lines(BufReader::new(tokio::io::stdin()), job_tx).await
        } else {
            info!("Reading from file: {}", config.ifile.display());
            let file = tokio::fs::File::open(&config.ifile).await?;
            read_lines(BufReader::new(file), job_tx).await
        }
    });

    // the job sender is gone by now, so the workers drain and exit
    for handle in handles {
        handle.join().map_err(|_| "decode worker panicked")?;
    }
    printer
        .join()
        .map_err(|_| "output thread panicked")??;
    read_result?;

    if config.stats {
        let stats = stats.lock();
        if config.json {
            eprintln!("{}", serde_json::to_string(&*stats)?);
        } else {
            eprint!("{}", stats);
        }
    }

    Ok(())
}

/// Feed every non-blank, non-comment line to the workers.
async fn read_lines<R>(reader: R, tx: Sender<Job>) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut seq = 0u64;

    while let Some(line) = lines.next_line().await? {
        let Some(hex) = frame_hex(&line) else {
            continue;
        };
        // blocks only while every worker is busy and the queue is full
        if tx.send((seq, hex.to_string())).is_err() {
            break;
        }
        seq += 1;
    }

    info!("{} lines queued for decoding", seq);
    Ok(())
}

/// Strip AVR framing (`*...;`) and whitespace; `None` for lines to skip.
fn frame_hex(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix('*').unwrap_or(line);
    let line = line.strip_suffix(';').unwrap_or(line);
    Some(line.trim())
}

fn decode_worker(
    rx: Receiver<Job>,
    tx: Sender<Rendered>,
    stats: Arc<Mutex<DecodeStats>>,
    config: Config,
) {
    while let Ok((seq, hex)) = rx.recv() {
        let rendered = match modes_decode::decode(&hex) {
            Ok(msg) => {
                stats.lock().record_message(&msg);
                render(&msg, &config)
            }
            Err(e) => {
                debug!(%hex, error = %e, "parse failure");
                stats.lock().record_error(&e);
                format!("error: {}", e)
            }
        };
        if tx.send((seq, rendered)).is_err() {
            break;
        }
    }
}

fn render(msg: &ModesMessage, config: &Config) -> String {
    if config.json {
        serde_json::to_string(msg).unwrap_or_else(|e| format!("error: {}", e))
    } else if config.raw {
        msg.summary()
    } else {
        msg.describe(!config.no_parity_check).to_string()
    }
}

/// Print rendered lines in input order, buffering the ones that arrive early.
fn print_in_order(rx: Receiver<Rendered>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut pending = BTreeMap::new();
    let mut next = 0u64;

    while let Ok((seq, text)) = rx.recv() {
        pending.insert(seq, text);
        while let Some(text) = pending.remove(&next) {
            writeln!(out, "{}", text)?;
            next += 1;
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_frame_hex() {
        assert_eq!(frame_hex("8D4840D6202CC371C32CE0576098"), Some("8D4840D6202CC371C32CE0576098"));
        assert_eq!(frame_hex("*02E19715AA8F22;"), Some("02E19715AA8F22"));
        assert_eq!(frame_hex("  *02E19715AA8F22;\r"), Some("02E19715AA8F22"));
        assert_eq!(frame_hex(""), None);
        assert_eq!(frame_hex("   "), None);
        assert_eq!(frame_hex("# recorded at EHAM"), None);
    }

    #[test]
    fn test_render_modes() {
        let msg = modes_decode::decode("8D4840D6202CC371C32CE0576098").unwrap();
        let mut config = Config::try_parse_from(["modes-decode"]).unwrap();
        assert!(render(&msg, &config).contains("CRC:  576098 (ok)"));

        config.no_parity_check = true;
        assert!(!render(&msg, &config).contains("CRC:"));

        config.raw = true;
        assert_eq!(render(&msg, &config), msg.summary());

        config.raw = false;
        config.json = true;
        assert!(render(&msg, &config).starts_with("{\"kind\":\"identification\""));
    }

    #[test]
    fn test_workers_keep_input_order() {
        let (job_tx, job_rx) = bounded(16);
        let (out_tx, out_rx) = bounded(16);
        let stats = Arc::new(Mutex::new(DecodeStats::new()));
        let config = Config::try_parse_from(["modes-decode", "--raw"]).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let (rx, tx, stats, cfg) =
                    (job_rx.clone(), out_tx.clone(), Arc::clone(&stats), config.clone());
                thread::spawn(move || decode_worker(rx, tx, stats, cfg))
            })
            .collect();
        drop(job_rx);
        drop(out_tx);

        let inputs = ["02E19715AA8F22", "zz", "8D4840D6202CC371C32CE0576098"];
        let feeder = thread::spawn(move || {
            for (seq, hex) in inputs.iter().enumerate() {
                job_tx.send((seq as u64, hex.to_string())).unwrap();
            }
        });
        feeder.join().unwrap();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut results: Vec<_> = out_rx.iter().collect();
        results.sort_by_key(|(seq, _)| *seq);
        assert_eq!(results.len(), 3);
        assert!(results[0].1.contains("short_acas"));
        assert!(results[1].1.starts_with("error: "));
        assert!(results[2].1.contains("identification"));

        let stats = stats.lock();
        assert_eq!(stats.decoded, 2);
        assert_eq!(stats.errors, 1);
    }
}
