//! ROM image source and sink.
//!
//! ROMs are read whole into memory. The patched image is committed with a
//! temp-file-and-rename so the target is either untouched or fully written.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Which of the two ROM images a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
pub enum RomRole {
    #[strum(serialize = "original ROM")]
    #[serde(rename = "original")]
    Original,
    #[strum(serialize = "modified ROM")]
    #[serde(rename = "modified")]
    Modified,
}

/// Read a whole ROM image.
pub fn read_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(bytes) => {
            debug!("Read {} bytes from {}", bytes.len(), path.display());
            Ok(bytes)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::RomNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(Error::RomRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Replace the ROM at `path` with `bytes` in one rename.
pub fn write_rom_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let to_write_error = |source: std::io::Error| Error::RomWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(to_write_error)?;
    temp.write_all(bytes).map_err(to_write_error)?;
    // The temp file is created 0600; carry over the target's mode
    match fs::metadata(path) {
        Ok(meta) => temp
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(to_write_error)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(to_write_error(e)),
    }
    temp.as_file().sync_all().map_err(to_write_error)?;
    temp.persist(path).map_err(|e| to_write_error(e.error))?;

    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
