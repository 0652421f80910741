use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, RotaError};
use crate::schedule::{PreferenceRequest, StaffMember};

/// Loads the staff directory from a `.csv` (`id,full_name`) or `.json` file
pub fn load_staff(path: impl AsRef<Path>) -> Result<Vec<StaffMember>> {
    let staff: Vec<StaffMember> = load_records(path.as_ref())?;
    debug!(count = staff.len(), path = %path.as_ref().display(), "loaded staff directory");
    Ok(staff)
}

/// Loads shift preferences from a `.csv` (`profile_id,date`) or `.json` file
pub fn load_preferences(path: impl AsRef<Path>) -> Result<Vec<PreferenceRequest>> {
    let preferences: Vec<PreferenceRequest> = load_records(path.as_ref())?;
    debug!(count = preferences.len(), path = %path.as_ref().display(), "loaded shift preferences");
    Ok(preferences)
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => read_csv(File::open(path)?),
        Some("json") => read_json(BufReader::new(File::open(path)?)),
        _ => Err(RotaError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Reads headed CSV records; unknown columns are ignored
pub fn read_csv<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for record in rdr.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Reads a JSON array of records, the shape the data service returns
pub fn read_json<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    Ok(serde_json::from_reader(reader)?)
}
