use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::schedule::Schedule;

/// Writes one `staffId,date` row per assignment, in schedule order
pub fn write_schedule_csv<W: Write>(schedule: &Schedule, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for assignment in schedule.iter() {
        wtr.serialize(assignment)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports `schedule` to a CSV file, replacing any previous export
pub fn export_schedule_csv(schedule: &Schedule, csv_path: &Path) -> Result<()> {
    let file = std::fs::File::create(csv_path)?;
    write_schedule_csv(schedule, file)
}
