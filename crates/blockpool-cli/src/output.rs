//! CLI output formatting.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use blockpool_core::{BlockDump, BlockState, Link};
use blockpool_harness::Verdict;

/// A report with its verdict flattened alongside, as written to stdout and
/// to report files.
#[derive(Debug, Serialize)]
pub struct Judged<'a, T: Serialize> {
    #[serde(flatten)]
    report: &'a T,
    verdict: Verdict,
}

impl<'a, T: Serialize> Judged<'a, T> {
    #[must_use]
    pub fn new(report: &'a T, verdict: Verdict) -> Self {
        Self { report, verdict }
    }
}

/// Payload bytes per hex dump row.
const DUMP_ROW: usize = 16;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a byte count with a binary unit.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

fn describe_link(link: Link) -> String {
    match link {
        Link::Next(index) => format!("next #{index}"),
        Link::End => "end of free list".to_string(),
        Link::Allocated => "allocated".to_string(),
    }
}

/// Render one block as a framed hex dump.
#[must_use]
pub fn format_block(dump: &BlockDump) -> String {
    let state = match dump.state {
        BlockState::Free => "free",
        BlockState::Allocated => "allocated",
    };
    let mut out = String::new();
    let _ = writeln!(out, "========[block #{}: {}]=========", dump.index, dump.address);
    let _ = writeln!(
        out,
        "link = 0x{:016x} ({}) [{state}]",
        dump.raw_link,
        describe_link(dump.link)
    );
    out.push('\n');
    for (row, chunk) in dump.payload.chunks(DUMP_ROW).enumerate() {
        let _ = write!(out, "  {:04x}:", row * DUMP_ROW);
        for byte in chunk {
            let _ = write!(out, " {byte:02x}");
        }
        out.push('\n');
    }
    out.push_str("============================================\n");
    out
}

/// Serialize `value` as pretty JSON into `out`.
pub fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Write `value` as pretty JSON to a file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_json(&mut file, value)?;
    file.flush()
}
