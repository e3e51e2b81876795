//! Machine-readable run summary.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::map::PointerMap;
use crate::params::RepointParams;
use crate::repointer::RunOutcome;
use crate::scan::ScanResult;
use crate::substitute::SubstitutionReport;

/// Everything a run produced, filled in stage by stage.
///
/// Fields stay `None` for stages the run never reached.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub timestamp: String,
    pub params: Option<RepointParams>,
    pub original_scan: Option<ScanResult>,
    pub modified_scan: Option<ScanResult>,
    pub pointer_map: Option<PointerMap>,
    pub substitutions: Option<SubstitutionReport>,
    pub outcome: Option<RunOutcome>,
    pub error: Option<String>,
}

impl RunSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save summary to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
