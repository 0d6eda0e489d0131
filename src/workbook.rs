//! Workbook emission.
//!
//! The emission boundary: consumes the assembled per-channel sequences and
//! renders one worksheet per channel with a `Timestamp | User | Message`
//! header row. The pipeline hands this module logical rows only; all
//! spreadsheet mechanics live here.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::transform::TransformedMessage;

/// Display format for message timestamps, e.g. `Sep 13, 2020 | 12:26`.
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%b %d, %Y | %H:%M";

/// Width of the timestamp and user columns.
const NARROW_COLUMN_WIDTH: f64 = 20.0;

/// Width of the message column.
const MESSAGE_COLUMN_WIDTH: f64 = 200.0;

/// Writes one worksheet per channel and saves the workbook at `path`.
///
/// Sheets appear in the order given (the assembler already sorts channels
/// ascending and messages descending). Parent directories of `path` are
/// created when missing.
pub fn write_workbook(sheets: &[(String, Vec<TransformedMessage>)], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    for (channel, messages) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(channel)?;

        worksheet.set_column_width(0, NARROW_COLUMN_WIDTH)?;
        worksheet.set_column_width(1, NARROW_COLUMN_WIDTH)?;
        worksheet.set_column_width(2, MESSAGE_COLUMN_WIDTH)?;

        worksheet.write_string(0, 0, "Timestamp")?;
        worksheet.write_string(0, 1, "User")?;
        worksheet.write_string(0, 2, "Message")?;

        let mut row: u32 = 1;
        for message in messages {
            let formatted = message.timestamp.format(TIMESTAMP_DISPLAY_FORMAT).to_string();
            worksheet.write_string(row, 0, &formatted)?;
            worksheet.write_string(row, 1, &message.author)?;
            worksheet.write_string(row, 2, &message.text)?;
            row += 1;
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    workbook.save(path)?;

    Ok(())
}
