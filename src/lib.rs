//! # slackhist
//!
//! A Rust library and CLI for exporting Slack workspace history archives to
//! Excel (`.xlsx`) workbooks.
//!
//! ## Overview
//!
//! A Slack export is a ZIP archive with one directory per channel, dated
//! JSON record files inside each directory, and two metadata sidecars
//! (`users.json`, `channels.json`) at the top level. slackhist extracts
//! plain messages and file shares, resolves author ids to handles, rewrites
//! inline `<@UXXXXXXXX>` mentions, and renders one worksheet per channel in
//! descending timestamp order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use slackhist::archive;
//! use slackhist::config::ExportConfig;
//! use slackhist::workbook::write_workbook;
//!
//! fn main() -> slackhist::Result<()> {
//!     let config = ExportConfig::new().with_timezone("UTC".parse()?);
//!     let assembler = archive::export("slack_export.zip", &config)?;
//!     write_workbook(&assembler.finalize(), Path::new("history.xlsx"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`archive`] — ZIP traversal and the [`archive::export`] pipeline driver
//! - [`metadata`] — [`MetadataIndex`](metadata::MetadataIndex), user/channel sidecars
//! - [`transform`] — record filtering, timestamps, mention rewriting
//! - [`assembler`] — per-channel buckets and presentation ordering
//! - [`workbook`] — worksheet rendering via `rust_xlsxwriter`
//! - [`config`] — [`ExportConfig`](config::ExportConfig), [`Timezone`](config::Timezone)
//! - [`cli`] — CLI argument types
//! - [`error`] — unified error types ([`SlackhistError`], [`Result`])

pub mod archive;
pub mod assembler;
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod transform;
pub mod workbook;

// Re-export the main types at the crate root for convenience
pub use error::{Result, SlackhistError};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::archive::{ArchiveReader, export};
    pub use crate::assembler::ChannelAssembler;
    pub use crate::config::{ExportConfig, Timezone};
    pub use crate::error::{Result, SlackhistError};
    pub use crate::metadata::{ChannelEntry, MetadataIndex, UserEntry};
    pub use crate::transform::{MessageTransformer, Record, TransformedMessage};
    pub use crate::workbook::write_workbook;
}
