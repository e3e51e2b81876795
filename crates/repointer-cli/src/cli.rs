//! Command line surface.

use std::path::PathBuf;

use clap::Parser;
use repointer_core::{DEFAULT_REPORT_FILE, RawParams, RepointConfig};

#[derive(Debug, Parser)]
#[command(name = "repointer", version)]
#[command(
    about = "Map pointers between an original and a modified ROM, then replace every old pointer in the modified ROM"
)]
pub struct Args {
    /// Path to the original ROM
    pub original_rom: PathBuf,

    /// Path to the modified (translated) ROM; patched in place
    pub translated_rom: PathBuf,

    /// Scan start offset in the original ROM (hex)
    pub original_scan_start: String,

    /// Scan start offset in the modified ROM (hex)
    pub translated_scan_start: String,

    /// Comma-separated hex marker sequences, e.g. "00FB,02FB"
    pub target_sequences: String,

    /// Scan end offset in the original ROM (hex, exclusive); default end of file
    #[arg(long, visible_alias = "ose")]
    pub original_scan_end: Option<String>,

    /// Scan end offset in the modified ROM (hex, exclusive); default end of file
    #[arg(long, visible_alias = "tse")]
    pub translated_scan_end: Option<String>,

    /// Byte inside each matched sequence that the pointers target (decimal or 0x hex)
    #[arg(long, default_value = "1")]
    pub offset_in_sequence: String,

    /// Do not add the 0x08000000 base address to file offsets
    #[arg(long)]
    pub no_base: bool,

    /// Do not mirror the report to the console
    #[arg(short, long)]
    pub quiet: bool,

    /// Compute and report replacements without writing the modified ROM
    #[arg(long)]
    pub dry_run: bool,

    /// Report file path
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    pub report: PathBuf,

    /// Also write a JSON summary of the run
    #[arg(long)]
    pub json_report: Option<PathBuf>,
}

impl Args {
    pub fn raw_params(&self) -> RawParams {
        RawParams {
            original_rom: self.original_rom.clone(),
            modified_rom: self.translated_rom.clone(),
            original_scan_start: self.original_scan_start.clone(),
            original_scan_end: self.original_scan_end.clone(),
            modified_scan_start: self.translated_scan_start.clone(),
            modified_scan_end: self.translated_scan_end.clone(),
            target_sequences: self.target_sequences.clone(),
            offset_in_sequence: self.offset_in_sequence.clone(),
            use_base: !self.no_base,
        }
    }

    pub fn config(&self) -> RepointConfig {
        let mut builder = RepointConfig::builder()
            .quiet(self.quiet)
            .dry_run(self.dry_run)
            .report_path(&self.report);
        if let Some(path) = &self.json_report {
            builder = builder.json_report_path(path);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments_and_defaults() {
        let args = Args::try_parse_from([
            "repointer",
            "orig.gba",
            "trans.gba",
            "100",
            "120",
            "00FB,02FB",
        ])
        .unwrap();

        let raw = args.raw_params();
        assert_eq!(raw.original_rom, PathBuf::from("orig.gba"));
        assert_eq!(raw.modified_rom, PathBuf::from("trans.gba"));
        assert_eq!(raw.original_scan_start, "100");
        assert_eq!(raw.modified_scan_start, "120");
        assert_eq!(raw.target_sequences, "00FB,02FB");
        assert_eq!(raw.offset_in_sequence, "1");
        assert!(raw.original_scan_end.is_none());
        assert!(raw.use_base);

        let config = args.config();
        assert!(!config.quiet);
        assert!(!config.dry_run);
        assert_eq!(config.report_path, PathBuf::from(DEFAULT_REPORT_FILE));
        assert!(config.json_report_path.is_none());
    }

    #[test]
    fn test_optional_flags() {
        let args = Args::try_parse_from([
            "repointer",
            "orig.gba",
            "trans.gba",
            "100",
            "100",
            "00FB",
            "--ose",
            "200",
            "--translated-scan-end",
            "0x300",
            "--offset-in-sequence",
            "0x0",
            "--no-base",
            "-q",
            "--dry-run",
            "--json-report",
            "run.json",
        ])
        .unwrap();

        let raw = args.raw_params();
        assert_eq!(raw.original_scan_end.as_deref(), Some("200"));
        assert_eq!(raw.modified_scan_end.as_deref(), Some("0x300"));
        assert_eq!(raw.offset_in_sequence, "0x0");
        assert!(!raw.use_base);

        let config = args.config();
        assert!(config.quiet);
        assert!(config.dry_run);
        assert_eq!(config.json_report_path, Some(PathBuf::from("run.json")));
    }

    #[test]
    fn test_missing_positional_is_rejected() {
        assert!(Args::try_parse_from(["repointer", "orig.gba", "trans.gba", "100"]).is_err());
    }
}
