use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::{error::Result, models::Overview};

/// Writes screener rows to `path` with a header line. A leading `~` is
/// expanded to the home directory.
pub fn write_overviews_csv(path: &str, rows: &[Overview]) -> Result<()> {
    let path = shellexpand::tilde(path);
    let mut writer = Writer::from_path(Path::new(path.as_ref()))?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;

    info!("Wrote {} rows to {}", rows.len(), path);
    Ok(())
}
