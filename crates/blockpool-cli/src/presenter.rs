//! CLI report presenter.

use std::io::{self, Write};

use blockpool_harness::{Inspection, SmokeReport, StressReport};

use crate::output::{
    format_block, format_bytes, format_duration, format_number, write_json, Judged,
};
use crate::ui;

/// Renders harness reports as text or JSON.
pub struct CLIReportPresenter {
    json: bool,
    quiet: bool,
    verbose: bool,
}

impl CLIReportPresenter {
    /// `json` wins over `quiet`; `verbose` adds pool statistics to text output.
    #[must_use]
    pub fn new(json: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }

    /// Present a smoke report.
    pub fn present_smoke(&self, out: &mut dyn Write, report: &SmokeReport) -> io::Result<()> {
        let verdict = report.verdict();
        if self.json {
            return write_json(out, &Judged::new(report, verdict));
        }
        if self.quiet {
            return writeln!(out, "{}", if verdict.passed { "PASS" } else { "FAIL" });
        }

        writeln!(out, "{}", ui::header("Smoke test"))?;
        writeln!(
            out,
            "Pool: {} blocks x {} bytes",
            report.config.capacity, report.config.block_size
        )?;
        for step in &report.steps {
            writeln!(out, "  {} {:<20} {}", ui::status(step.passed), step.name, step.detail)?;
        }
        if self.verbose {
            writeln!(out, "Stats: {:?}", report.stats)?;
        }
        writeln!(out, "Result: {}", ui::status(verdict.passed))
    }

    /// Present a stress report.
    pub fn present_stress(&self, out: &mut dyn Write, report: &StressReport) -> io::Result<()> {
        let verdict = report.verdict();
        if self.json {
            return write_json(out, &Judged::new(report, verdict));
        }
        if self.quiet {
            return writeln!(out, "{}", if verdict.passed { "PASS" } else { "FAIL" });
        }

        writeln!(out, "{}", ui::header("Stress test"))?;
        writeln!(
            out,
            "Threads: {} ({} passed, {} starved), rounds per thread: {}",
            report.threads, report.passed_threads, report.starved_threads, report.rounds
        )?;
        writeln!(
            out,
            "Allocations: {}  Releases: {}  Retries: {}",
            format_number(report.allocations),
            format_number(report.releases),
            format_number(report.retries)
        )?;
        writeln!(
            out,
            "Violations: {}  Corruptions: {}  Unexpected errors: {}",
            report.violations, report.corruptions, report.unexpected_errors
        )?;
        writeln!(
            out,
            "Peak in use: {}/{}",
            report.stats.peak_in_use, report.capacity
        )?;
        writeln!(out, "Duration: {}", format_duration(report.elapsed))?;
        if report.cancelled {
            writeln!(out, "Run was cancelled")?;
        }
        for reason in &verdict.reasons {
            writeln!(out, "  - {reason}")?;
        }
        writeln!(out, "Result: {}", ui::status(verdict.passed))
    }

    /// Present a staged pool snapshot.
    pub fn present_inspection(&self, out: &mut dyn Write, inspection: &Inspection) -> io::Result<()> {
        if self.json {
            return write_json(out, inspection);
        }

        writeln!(out, "{}", ui::header("Pool layout"))?;
        writeln!(
            out,
            "{} blocks x {} bytes, region {}, {} allocated, {} released",
            inspection.config.capacity,
            inspection.config.block_size,
            format_bytes(inspection.region_len),
            inspection.allocated,
            inspection.released
        )?;
        let free: Vec<String> = inspection.free_list.iter().map(ToString::to_string).collect();
        writeln!(out, "Free list (head first): [{}]", free.join(", "))?;
        if self.quiet {
            return Ok(());
        }
        for block in &inspection.blocks {
            write!(out, "{}", format_block(block))?;
        }
        Ok(())
    }

    /// Report an error on stderr. Quiet mode drops the error chain.
    pub fn present_error(&self, err: &anyhow::Error) {
        if self.quiet {
            ui::print_error(&err.to_string());
        } else {
            ui::print_error(&format!("{err:#}"));
        }
    }
}
