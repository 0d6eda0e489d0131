//! Command-line interface definition using clap.

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;

/// Export Slack workspace history archives to Excel (.xlsx) workbooks.
#[derive(Parser, Debug, Clone)]
#[command(name = "slackhist")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    slackhist slack_export.zip
    slackhist -n history.xlsx slack_export.zip
    slackhist -d reports/ -t Europe/Berlin slack_export.zip
    slackhist --timezone UTC slack_export.zip")]
pub struct Args {
    /// Path to the Slack export ZIP archive
    pub archive: PathBuf,

    /// Name of the exported spreadsheet (.xlsx appended when missing)
    #[arg(short, long, default_value_t = default_output_name())]
    pub name: String,

    /// Output directory for the exported workbook
    #[arg(short, long, default_value = "./")]
    pub destination: PathBuf,

    /// Timezone for message timestamps: "local" or an IANA name
    /// such as UTC or America/New_York
    #[arg(short, long, default_value = "local")]
    pub timezone: String,
}

impl Args {
    /// Full output path: destination joined with the (suffixed) name.
    pub fn output_path(&self) -> PathBuf {
        self.destination.join(ensure_xlsx_suffix(&self.name))
    }
}

/// Default workbook name, e.g. `2026-Aug-23_SlackExport.xlsx`.
fn default_output_name() -> String {
    format!("{}_SlackExport.xlsx", Local::now().format("%Y-%b-%d"))
}

/// Appends `.xlsx` unless the name already ends with it.
fn ensure_xlsx_suffix(name: &str) -> String {
    if Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
    {
        name.to_string()
    } else {
        format!("{name}.xlsx")
    }
}
