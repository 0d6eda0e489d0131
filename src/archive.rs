//! Export archive traversal.
//!
//! A Slack export is a ZIP archive: one directory per channel holding dated
//! JSON record files, plus `users.json` and `channels.json` sidecars and an
//! optional `integration_logs.json` at the top level.
//!
//! [`ArchiveReader`] walks the entry list twice. Pass one locates the two
//! sidecars (exact base-name match at any depth) and loads them into a
//! [`MetadataIndex`]. Pass two visits every entry: directories register a
//! channel bucket, known non-message files are skipped, and every other
//! file is decoded as a record sequence and fed through the transformer.
//!
//! A record file's owning channel is derived from its parent directory's
//! base name, never from a previously seen directory entry: ZIP central
//! directories may list files before their directories, or omit directory
//! entries entirely.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::assembler::ChannelAssembler;
use crate::config::ExportConfig;
use crate::error::{Result, SlackhistError};
use crate::metadata::MetadataIndex;
use crate::transform::{MessageTransformer, Record};

/// Top-level sidecar listing workspace users.
const USERS_SIDECAR: &str = "users.json";

/// Top-level sidecar listing workspace channels.
const CHANNELS_SIDECAR: &str = "channels.json";

/// Known non-message file, ignored during the walk.
const INTEGRATION_LOG: &str = "integration_logs.json";

/// An open export archive.
///
/// The ZIP handle lives for one export run and is released when the reader
/// is dropped, on success and error paths alike.
#[derive(Debug)]
pub struct ArchiveReader {
    archive: ZipArchive<File>,
    path: PathBuf,
}

impl ArchiveReader {
    /// Opens an export archive.
    ///
    /// Fails with [`SlackhistError::ArchiveUnreadable`] when the path does
    /// not exist or is not a valid ZIP container.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .map_err(|e| SlackhistError::archive_unreadable(&path, zip::result::ZipError::Io(e)))?;
        let archive = ZipArchive::new(file)
            .map_err(|e| SlackhistError::archive_unreadable(&path, e))?;
        Ok(Self { archive, path })
    }

    /// Pass one: locate the user and channel sidecars and decode them.
    ///
    /// Files with other names are ignored here; they are handled (or
    /// skipped) in pass two.
    pub fn load_metadata(&mut self) -> Result<MetadataIndex> {
        let mut index = MetadataIndex::new();

        for i in 0..self.archive.len() {
            let mut entry = self.entry(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            match base_name(&name) {
                USERS_SIDECAR => {
                    let contents = read_to_string(&mut entry)?;
                    let users = serde_json::from_str(&contents)
                        .map_err(|e| SlackhistError::metadata_decode(&name, e))?;
                    index.load_users(users);
                }
                CHANNELS_SIDECAR => {
                    let contents = read_to_string(&mut entry)?;
                    let channels = serde_json::from_str(&contents)
                        .map_err(|e| SlackhistError::metadata_decode(&name, e))?;
                    index.load_channels(channels);
                }
                _ => {}
            }
        }

        Ok(index)
    }

    /// Pass two: walk every entry and assemble per-channel messages.
    ///
    /// Decoding failure on any record file is fatal to the whole run.
    pub fn collect_channels(
        &mut self,
        transformer: &MessageTransformer<'_>,
    ) -> Result<ChannelAssembler> {
        let mut assembler = ChannelAssembler::new();

        for i in 0..self.archive.len() {
            let mut entry = self.entry(i)?;
            let name = entry.name().trim_end_matches('/').to_string();

            if entry.is_dir() {
                assembler.register(base_name(&name));
                continue;
            }

            if matches!(
                base_name(&name),
                USERS_SIDECAR | CHANNELS_SIDECAR | INTEGRATION_LOG
            ) {
                continue;
            }

            // Channel name comes from the parent directory's base name.
            // Files at the archive root have no owning channel.
            let Some(channel) = parent_base_name(&name) else {
                continue;
            };
            let channel = channel.to_string();

            let contents = read_to_string(&mut entry)?;
            let records: Vec<Record> = serde_json::from_str(&contents)
                .map_err(|e| SlackhistError::record_decode(&name, e))?;

            for record in &records {
                if let Some(message) = transformer.transform(record)? {
                    assembler.append(channel.clone(), message);
                }
            }
        }

        Ok(assembler)
    }

    fn entry(&mut self, index: usize) -> Result<zip::read::ZipFile<'_>> {
        let path = self.path.clone();
        self.archive
            .by_index(index)
            .map_err(|e| SlackhistError::archive_unreadable(path, e))
    }
}

/// Runs the full extraction pipeline over one archive.
///
/// Opens the archive, loads metadata, transforms every retained record and
/// returns the assembled per-channel buckets ready for emission.
pub fn export(path: impl AsRef<Path>, config: &ExportConfig) -> Result<ChannelAssembler> {
    let mut reader = ArchiveReader::open(path)?;
    let index = reader.load_metadata()?;
    let transformer = MessageTransformer::new(&index, config.timezone);
    reader.collect_channels(&transformer)
}

/// Base name of a `/`-separated archive entry path.
fn base_name(name: &str) -> &str {
    name.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(name)
}

/// Base name of the entry's immediate parent directory, if it has one.
fn parent_base_name(name: &str) -> Option<&str> {
    let (parent, _) = name.rsplit_once('/')?;
    let base = base_name(parent);
    (!base.is_empty()).then_some(base)
}

fn read_to_string(entry: &mut zip::read::ZipFile<'_>) -> Result<String> {
    let mut contents = String::new();
    entry.read_to_string(&mut contents)?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timezone;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const USERS_JSON: &str = r#"[
        {"id": "U123456789", "name": "alice", "real_name": "Alice Doe"},
        {"id": "U987654321", "name": "bob"}
    ]"#;

    const CHANNELS_JSON: &str = r#"[
        {"id": "C111111111", "name": "general"},
        {"id": "C222222222", "name": "random"}
    ]"#;

    fn write_archive(entries: &[(&str, Option<&str>)]) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut writer = zip::ZipWriter::new(file.reopen().unwrap());
        let options = SimpleFileOptions::default();
        for (name, contents) in entries {
            match contents {
                Some(contents) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(contents.as_bytes()).unwrap();
                }
                None => {
                    writer.add_directory(*name, options).unwrap();
                }
            }
        }
        writer.finish().unwrap();
        file
    }

    fn utc_config() -> ExportConfig {
        ExportConfig::new().with_timezone(Timezone::Named(chrono_tz::UTC))
    }

    #[test]
    fn test_open_missing_archive() {
        let err = ArchiveReader::open("/no/such/export.zip").unwrap_err();
        assert!(err.is_archive());
    }

    #[test]
    fn test_open_invalid_container() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a zip").unwrap();
        let err = ArchiveReader::open(file.path()).unwrap_err();
        assert!(err.is_archive());
    }

    #[test]
    fn test_load_metadata() {
        let archive = write_archive(&[
            ("users.json", Some(USERS_JSON)),
            ("channels.json", Some(CHANNELS_JSON)),
        ]);
        let mut reader = ArchiveReader::open(archive.path()).unwrap();
        let index = reader.load_metadata().unwrap();
        assert_eq!(index.short_handle("U123456789"), "alice");
        assert_eq!(index.channel("C111111111").unwrap().name, "general");
    }

    #[test]
    fn test_malformed_sidecar_is_fatal() {
        let archive = write_archive(&[("users.json", Some("{ not json"))]);
        let mut reader = ArchiveReader::open(archive.path()).unwrap();
        let err = reader.load_metadata().unwrap_err();
        assert!(matches!(
            err,
            SlackhistError::MetadataDecodeFailed { .. }
        ));
    }

    #[test]
    fn test_export_end_to_end() {
        let records = r#"[
            {"type": "message", "user": "U123456789", "text": "hello <@U987654321>", "ts": "1600000000.000100"},
            {"type": "message", "user": "U987654321", "text": "hi", "ts": "1600000100.000000"},
            {"type": "message", "subtype": "channel_join", "user": "U987654321", "text": "joined", "ts": "1600000200.000000"}
        ]"#;
        let archive = write_archive(&[
            ("users.json", Some(USERS_JSON)),
            ("channels.json", Some(CHANNELS_JSON)),
            ("integration_logs.json", Some("[]")),
            ("general/", None),
            ("general/2020-09-13.json", Some(records)),
        ]);

        let assembler = export(archive.path(), &utc_config()).unwrap();
        let sheets = assembler.finalize();
        assert_eq!(sheets.len(), 1);
        let (channel, messages) = &sheets[0];
        assert_eq!(channel, "general");
        assert_eq!(messages.len(), 2);
        // Descending timestamp order
        assert_eq!(messages[0].text, "hi");
        assert_eq!(messages[1].text, "hello @bob");
    }

    #[test]
    fn test_file_before_directory_entry() {
        // Files may precede their directory in the entry list; the channel
        // comes from the parent path either way.
        let records = r#"[{"type": "message", "user": "U123456789", "text": "x", "ts": "1.0"}]"#;
        let archive = write_archive(&[
            ("users.json", Some(USERS_JSON)),
            ("random/2020-09-13.json", Some(records)),
            ("random/", None),
        ]);

        let assembler = export(archive.path(), &utc_config()).unwrap();
        assert_eq!(assembler.channel_count(), 1);
        assert_eq!(assembler.message_count(), 1);
    }

    #[test]
    fn test_directory_without_files_gets_empty_bucket() {
        let archive = write_archive(&[("users.json", Some(USERS_JSON)), ("archived/", None)]);
        let assembler = export(archive.path(), &utc_config()).unwrap();
        let sheets = assembler.finalize();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].0, "archived");
        assert!(sheets[0].1.is_empty());
    }

    #[test]
    fn test_malformed_record_file_is_fatal() {
        let archive = write_archive(&[
            ("users.json", Some(USERS_JSON)),
            ("general/", None),
            ("general/bad.json", Some("not json at all")),
        ]);
        let err = export(archive.path(), &utc_config()).unwrap_err();
        assert!(matches!(err, SlackhistError::RecordDecodeFailed { .. }));
    }

    #[test]
    fn test_missing_sidecars_still_extracts() {
        // Unknown ids resolve to empty strings; extraction proceeds.
        let records = r#"[{"type": "message", "user": "U123456789", "text": "hi", "ts": "1.0"}]"#;
        let archive = write_archive(&[("general/", None), ("general/day.json", Some(records))]);
        let assembler = export(archive.path(), &utc_config()).unwrap();
        let sheets = assembler.finalize();
        assert_eq!(sheets[0].1[0].author, "");
    }

    #[test]
    fn test_base_name_helpers() {
        assert_eq!(base_name("general/"), "general");
        assert_eq!(base_name("general/2020-09-13.json"), "2020-09-13.json");
        assert_eq!(base_name("users.json"), "users.json");
        assert_eq!(parent_base_name("general/2020-09-13.json"), Some("general"));
        assert_eq!(
            parent_base_name("export/general/2020-09-13.json"),
            Some("general")
        );
        assert_eq!(parent_base_name("users.json"), None);
    }
}
