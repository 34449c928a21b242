use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::RoadNetError;
use crate::table::RoadTable;
use crate::traits::TableExporter;

/// Writes tables as UTF-8 CSV files under one output directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `{output_dir}/{filename}.csv`
    pub fn output_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(format!("{}.csv", filename.trim()))
    }
}

// Temp files default to 0600; ask for 0666 so the process umask decides the
// final mode as for any other created file.
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".roadnet-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}

impl TableExporter for CsvExporter {
    fn export(&self, table: &RoadTable, filename: &str) -> Result<PathBuf, RoadNetError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(filename);

        // Rows go to a temp file in the same directory; the target only
        // appears once everything is written.
        let tmp = temp_builder().tempfile_in(&self.output_dir)?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file());
            writer.write_record(table.columns())?;
            for row in table.rows() {
                writer.write_record(row.to_record())?;
            }
            writer.flush()?;
        }
        debug!("Wrote {} rows to {:?}", table.len(), tmp.path());

        tmp.persist(&path).map_err(|e| e.error)?;
        info!("CSV saved: path={:?}, rows={}", path, table.len());

        Ok(path)
    }
}
