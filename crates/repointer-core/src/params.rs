//! Run parameters and options.
//!
//! [`RawParams`] is the text bag handed over by the command line.
//! [`RepointParams::resolve`] validates it into typed values once; the
//! pipeline stages only ever see the typed form.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::hex::{ByteSequence, parse_hex_offset, parse_offset_in_sequence, parse_sequence_list};
use crate::report::DEFAULT_REPORT_FILE;
use crate::rom::RomRole;
use crate::scan::ScanWindow;

/// Unvalidated parameters as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParams {
    pub original_rom: PathBuf,
    pub modified_rom: PathBuf,
    /// Hex
    pub original_scan_start: String,
    /// Hex; `None` scans to end of file
    pub original_scan_end: Option<String>,
    pub modified_scan_start: String,
    pub modified_scan_end: Option<String>,
    /// Comma-separated hex sequences, e.g. `"00FB,02FB"`
    pub target_sequences: String,
    /// Decimal or prefixed hex/octal/binary
    pub offset_in_sequence: String,
    pub use_base: bool,
}

impl RawParams {
    /// Parameters with the default options: open-ended windows, offset 1, base applied.
    pub fn new(
        original_rom: impl Into<PathBuf>,
        modified_rom: impl Into<PathBuf>,
        original_scan_start: impl Into<String>,
        modified_scan_start: impl Into<String>,
        target_sequences: impl Into<String>,
    ) -> Self {
        Self {
            original_rom: original_rom.into(),
            modified_rom: modified_rom.into(),
            original_scan_start: original_scan_start.into(),
            original_scan_end: None,
            modified_scan_start: modified_scan_start.into(),
            modified_scan_end: None,
            target_sequences: target_sequences.into(),
            offset_in_sequence: "1".to_string(),
            use_base: true,
        }
    }
}

/// Validated parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepointParams {
    pub original_rom: PathBuf,
    pub modified_rom: PathBuf,
    pub original_window: ScanWindow,
    pub modified_window: ScanWindow,
    pub sequences: Vec<ByteSequence>,
    pub offset_in_sequence: usize,
    pub use_base: bool,
}

impl RepointParams {
    pub fn resolve(raw: &RawParams) -> Result<Self> {
        let original_start = parse_hex_offset(&raw.original_scan_start)?;
        let original_end = raw
            .original_scan_end
            .as_deref()
            .map(parse_hex_offset)
            .transpose()?;
        let modified_start = parse_hex_offset(&raw.modified_scan_start)?;
        let modified_end = raw
            .modified_scan_end
            .as_deref()
            .map(parse_hex_offset)
            .transpose()?;
        let offset_in_sequence = parse_offset_in_sequence(&raw.offset_in_sequence)?;

        let original_window = ScanWindow::new(RomRole::Original, original_start, original_end)?;
        let modified_window = ScanWindow::new(RomRole::Modified, modified_start, modified_end)?;

        let sequences = parse_sequence_list(&raw.target_sequences)?;

        Ok(Self {
            original_rom: raw.original_rom.clone(),
            modified_rom: raw.modified_rom.clone(),
            original_window,
            modified_window,
            sequences,
            offset_in_sequence,
            use_base: raw.use_base,
        })
    }

    pub fn window(&self, role: RomRole) -> ScanWindow {
        match role {
            RomRole::Original => self.original_window,
            RomRole::Modified => self.modified_window,
        }
    }

    pub fn rom_path(&self, role: RomRole) -> &Path {
        match role {
            RomRole::Original => &self.original_rom,
            RomRole::Modified => &self.modified_rom,
        }
    }

    /// Sequences joined back for display, e.g. `"00FB,02FB"`.
    pub fn sequences_display(&self) -> String {
        self.sequences
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Options that shape a run without changing what it computes.
#[derive(Debug, Clone)]
pub struct RepointConfig {
    /// Suppress console mirroring of the report
    pub quiet: bool,
    /// Compute everything but never write the modified ROM
    pub dry_run: bool,
    /// Text report location
    pub report_path: PathBuf,
    /// Optional JSON summary location
    pub json_report_path: Option<PathBuf>,
}

impl Default for RepointConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            dry_run: false,
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
            json_report_path: None,
        }
    }
}

impl RepointConfig {
    /// Create a new configuration builder
    pub fn builder() -> RepointConfigBuilder {
        RepointConfigBuilder::default()
    }
}

/// Builder for RepointConfig
#[derive(Debug, Clone, Default)]
pub struct RepointConfigBuilder {
    quiet: Option<bool>,
    dry_run: Option<bool>,
    report_path: Option<PathBuf>,
    json_report_path: Option<PathBuf>,
}

impl RepointConfigBuilder {
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = Some(quiet);
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }

    /// Set the text report path
    pub fn report_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Also write a JSON summary to this path
    pub fn json_report_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.json_report_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> RepointConfig {
        let default = RepointConfig::default();
        RepointConfig {
            quiet: self.quiet.unwrap_or(default.quiet),
            dry_run: self.dry_run.unwrap_or(default.dry_run),
            report_path: self.report_path.unwrap_or(default.report_path),
            json_report_path: self.json_report_path.or(default.json_report_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn raw() -> RawParams {
        RawParams::new("orig.gba", "trans.gba", "100", "0x100", "00FB,02FB")
    }

    #[test]
    fn test_resolve_defaults() {
        let params = RepointParams::resolve(&raw()).unwrap();
        assert_eq!(params.original_window.start(), 0x100);
        assert_eq!(params.original_window.to_string(), "0x100 - EOF");
        assert_eq!(params.modified_window.start(), 0x100);
        assert_eq!(params.offset_in_sequence, 1);
        assert!(params.use_base);
        assert_eq!(params.sequences.len(), 2);
        assert_eq!(params.sequences_display(), "00FB,02FB");
    }

    #[test]
    fn test_resolve_bounded_windows() {
        let mut raw = raw();
        raw.original_scan_end = Some("200".to_string());
        raw.modified_scan_end = Some("0x280".to_string());
        raw.offset_in_sequence = "0x0".to_string();

        let params = RepointParams::resolve(&raw).unwrap();
        assert_eq!(params.window(RomRole::Original).to_string(), "0x100 - 0x200");
        assert_eq!(params.window(RomRole::Modified).to_string(), "0x100 - 0x280");
        assert_eq!(params.offset_in_sequence, 0);
    }

    #[test]
    fn test_resolve_rejects_inverted_window() {
        let mut raw = raw();
        raw.modified_scan_end = Some("80".to_string());
        let err = RepointParams::resolve(&raw).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidWindow {
                role: RomRole::Modified,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_text() {
        let mut bad_start = raw();
        bad_start.original_scan_start = "xyz".to_string();
        assert!(matches!(
            RepointParams::resolve(&bad_start),
            Err(Error::InvalidHex { .. })
        ));

        let mut bad_seq = raw();
        bad_seq.target_sequences = "00F".to_string();
        assert!(matches!(
            RepointParams::resolve(&bad_seq),
            Err(Error::InvalidSequence { .. })
        ));

        let mut bad_offset = raw();
        bad_offset.offset_in_sequence = "one".to_string();
        assert!(matches!(
            RepointParams::resolve(&bad_offset),
            Err(Error::InvalidOffsetInSequence { .. })
        ));
    }

    #[test]
    fn test_config_builder() {
        let config = RepointConfig::builder()
            .quiet(true)
            .report_path("out/log.txt")
            .json_report_path("out/log.json")
            .build();
        assert!(config.quiet);
        assert!(!config.dry_run);
        assert_eq!(config.report_path, PathBuf::from("out/log.txt"));
        assert_eq!(config.json_report_path, Some(PathBuf::from("out/log.json")));

        let default = RepointConfig::builder().build();
        assert_eq!(default.report_path, PathBuf::from(DEFAULT_REPORT_FILE));
        assert!(default.json_report_path.is_none());
    }
}
