use crate::domain::model::MusicianRecord;
use crate::utils::error::{EtlError, Result};

/// Roster as CSV with a `category,name,town,country` header; unknown values are empty.
pub fn roster_to_csv(roster: &[MusicianRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in roster {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
