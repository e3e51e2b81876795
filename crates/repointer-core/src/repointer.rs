//! Repointing pipeline.
//!
//! `Repointer` drives one run end to end:
//! - resolve the raw parameters
//! - scan the original ROM and the modified ROM for markers
//! - check that both scans found the same number of markers
//! - build the old→new pointer map
//! - substitute every old pointer in the modified ROM buffer
//! - write the buffer back in one atomic step
//!
//! Every path, including early aborts, ends with the report being written.
//!
//! ## Example
//!
//! ```ignore
//! use repointer_core::{RawParams, RepointConfig, Repointer};
//!
//! let raw = RawParams::new("original.gba", "translated.gba", "100", "100", "00FB,02FB");
//! let config = RepointConfig::builder().quiet(true).build();
//! let outcome = Repointer::new(config).run(&raw)?;
//! ```

use chrono::Local;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::map::PointerMap;
use crate::params::{RawParams, RepointConfig, RepointParams};
use crate::pointer::BASE_ADDRESS;
use crate::report::{
    RULE, RunLog, RunSummary, duplicate_line, map_table_header, map_table_row,
    substitution_header, substitution_row,
};
use crate::rom::{RomRole, read_rom, write_rom_atomic};
use crate::scan::{MarkerScanner, ScanResult};
use crate::substitute;

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Replacements were written to the modified ROM
    Patched { replacements: usize },
    /// Replacements were computed but not written
    DryRun { replacements: usize },
    /// No old pointer occurred in the modified ROM; nothing was written
    NoChanges,
}

impl RunOutcome {
    pub fn replacements(&self) -> usize {
        match self {
            RunOutcome::Patched { replacements } | RunOutcome::DryRun { replacements } => {
                *replacements
            }
            RunOutcome::NoChanges => 0,
        }
    }

    pub fn wrote_rom(&self) -> bool {
        matches!(self, RunOutcome::Patched { .. })
    }
}

pub struct Repointer {
    config: RepointConfig,
}

impl Repointer {
    pub fn new(config: RepointConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline, mirroring the report to stdout unless quiet.
    pub fn run(&self, raw: &RawParams) -> Result<RunOutcome> {
        let mut log = RunLog::new(self.config.quiet);
        self.run_with_log(raw, &mut log)
    }

    /// Run the pipeline with a caller-provided log.
    pub fn run_with_log(&self, raw: &RawParams, log: &mut RunLog) -> Result<RunOutcome> {
        let mut summary = RunSummary {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            ..Default::default()
        };

        let result = self.execute(raw, log, &mut summary);
        match &result {
            Ok(outcome) => {
                info!("Run finished: {:?}", outcome);
                summary.outcome = Some(*outcome);
            }
            Err(e) => {
                warn!("Run aborted: {}", e);
                log.error(format!("[{}] {}", e.class(), e));
                summary.error = Some(e.to_string());
            }
        }

        self.flush(log, &summary);
        result
    }

    fn execute(
        &self,
        raw: &RawParams,
        log: &mut RunLog,
        summary: &mut RunSummary,
    ) -> Result<RunOutcome> {
        log.echo(format!(
            "Run Report - Global Pointer Repointer - {}",
            summary.timestamp
        ));
        log.echo(format!("Original ROM: {}", raw.original_rom.display()));
        log.echo(format!("Modified ROM: {}", raw.modified_rom.display()));
        log.echo(RULE);

        let params = match RepointParams::resolve(raw) {
            Ok(params) => params,
            Err(e) => {
                write_raw_params(log, raw);
                return Err(e);
            }
        };
        write_params(log, &params);
        summary.params = Some(params.clone());

        // Phase 1: original ROM markers
        let original_rom = read_rom(params.rom_path(RomRole::Original))?;
        let original_scan = scan_rom(log, &params, RomRole::Original, &original_rom);
        summary.original_scan = Some(original_scan.clone());
        drop(original_rom);

        // Phase 2: modified ROM markers; this buffer is the one patched later
        let mut modified_rom = read_rom(params.rom_path(RomRole::Modified))?;
        let modified_scan = scan_rom(log, &params, RomRole::Modified, &modified_rom);
        summary.modified_scan = Some(modified_scan.clone());

        // Phase 3: count parity and map
        if original_scan.len() != modified_scan.len() {
            log.echo("");
            log.echo(format!("  - original ROM: {} marker(s)", original_scan.len()));
            log.echo(format!("  - modified ROM: {} marker(s)", modified_scan.len()));
            log.echo("The operation cannot continue safely. Check the scan windows and ROM files.");
            return Err(Error::CountMismatch {
                original: original_scan.len(),
                modified: modified_scan.len(),
            });
        }

        let map = PointerMap::build(
            &original_scan.target_offsets,
            &modified_scan.target_offsets,
            params.use_base,
        )?;
        write_map(log, &map);
        summary.pointer_map = Some(map.clone());

        // Phase 4: substitution over the whole modified ROM
        log.note("Starting global search and replace in the modified ROM...");
        let report = substitute::apply(&mut modified_rom, &map);

        log.record("");
        log.record("== Global Substitution Report ==");
        log.record(substitution_header());
        log.record(RULE);
        for replacement in &report.replacements {
            log.record(substitution_row(replacement));
        }
        for count in report.per_pointer.iter().filter(|c| c.count > 0) {
            log.note(format!(
                "  - Pointer 0x{:08X} replaced {} time(s)",
                count.old, count.count
            ));
        }
        let total = report.total;
        let noop = report.is_noop();
        summary.substitutions = Some(report);

        if noop {
            log.warn(
                "No occurrence of the old pointers was found in the modified ROM. No changes were written.",
            );
            return Ok(RunOutcome::NoChanges);
        }

        log.record("");
        log.record(RULE);

        if self.config.dry_run {
            log.echo(format!(
                "Dry run: {} replacement(s) computed, modified ROM left untouched.",
                total
            ));
            return Ok(RunOutcome::DryRun {
                replacements: total,
            });
        }

        // Phase 5: commit
        write_rom_atomic(params.rom_path(RomRole::Modified), &modified_rom)?;
        log.echo(format!(
            "Operation completed successfully. Total of {} replacement(s) performed.",
            total
        ));

        Ok(RunOutcome::Patched {
            replacements: total,
        })
    }

    /// Persist the text report and the optional JSON summary. Failures are
    /// logged and never change the run result.
    fn flush(&self, log: &mut RunLog, summary: &RunSummary) {
        let path = &self.config.report_path;
        match log.save(path) {
            Ok(()) => log.note(format!("Detailed log saved to: {}", path.display())),
            Err(e) => error!("Failed to write report file {}: {}", path.display(), e),
        }

        if let Some(json_path) = &self.config.json_report_path {
            match summary.save(json_path) {
                Ok(()) => debug!("Saved JSON summary to {}", json_path.display()),
                Err(e) => error!("Failed to write JSON summary {}: {}", json_path.display(), e),
            }
        }
    }
}

fn scan_rom(log: &mut RunLog, params: &RepointParams, role: RomRole, rom: &[u8]) -> ScanResult {
    log.note("");
    log.note(format!("Scanning the {} for markers...", role));

    let scanner = MarkerScanner::new(&params.sequences, params.offset_in_sequence);
    let result = scanner.scan(rom, params.window(role));

    for skipped in &result.skipped {
        log.warn(format!(
            "Offset in sequence ({}) is invalid for sequence {} (length {}) matched at 0x{:X} in the {}. Skipping this occurrence.",
            params.offset_in_sequence,
            skipped.sequence,
            skipped.sequence.len(),
            skipped.match_offset,
            role
        ));
    }

    log.echo(format!(
        "Found {} marker(s) in the {} ({} occurrence(s), {} skipped).",
        result.len(),
        role,
        result.occurrences,
        result.skipped.len()
    ));
    info!("{}: {} marker(s)", role, result.len());
    result
}

fn write_params(log: &mut RunLog, params: &RepointParams) {
    log.echo("Analysis Parameters:");
    log.echo(format!(
        "  Target sequences: {}",
        params.sequences_display()
    ));
    log.echo(format!(
        "  Offset in sequence: {}",
        params.offset_in_sequence
    ));
    log.echo(format!(
        "  Use base address (0x{:08X}): {}",
        BASE_ADDRESS,
        if params.use_base { "yes" } else { "no" }
    ));
    log.echo(format!(
        "  Scan window in original ROM: {}",
        params.original_window
    ));
    log.echo(format!(
        "  Scan window in modified ROM: {}",
        params.modified_window
    ));
    log.echo(RULE);
}

fn write_raw_params(log: &mut RunLog, raw: &RawParams) {
    log.record("Parameters as given:");
    log.record(format!("  Target sequences: {}", raw.target_sequences));
    log.record(format!("  Offset in sequence: {}", raw.offset_in_sequence));
    log.record(format!(
        "  Original scan: {} - {}",
        raw.original_scan_start,
        raw.original_scan_end.as_deref().unwrap_or("EOF")
    ));
    log.record(format!(
        "  Modified scan: {} - {}",
        raw.modified_scan_start,
        raw.modified_scan_end.as_deref().unwrap_or("EOF")
    ));
    log.record(RULE);
}

fn write_map(log: &mut RunLog, map: &PointerMap) {
    log.record("");
    log.record("== Old -> New Pointer Map ==");
    log.record(format!("Total of {} pair(s) mapped.", map.len()));
    log.record(RULE);
    log.record(map_table_header());
    log.record(RULE);
    for pair in map.iter() {
        log.record(map_table_row(pair));
    }
    log.record(RULE);

    for dup in map.duplicates() {
        log.warn(duplicate_line(dup));
    }

    log.note("");
    log.note(format!("Pointer map built: {} pair(s).", map.len()));
}
