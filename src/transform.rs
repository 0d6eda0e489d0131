//! Record filtering and transformation.
//!
//! [`MessageTransformer`] turns one raw [`Record`] into a
//! [`TransformedMessage`]: it drops everything except plain messages and
//! file shares, parses the fixed-point `seconds.micros` timestamp into the
//! configured timezone, resolves the author id to a short handle and
//! rewrites inline `<@UXXXXXXXX>` mention tokens to `@handle`.
//!
//! Mention rewriting is single-pass and non-recursive: a substituted handle
//! is never re-scanned for further tokens.

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use serde::Deserialize;

use crate::config::Timezone;
use crate::error::{Result, SlackhistError};
use crate::metadata::MetadataIndex;

/// Record kind retained by the filter.
const KIND_MESSAGE: &str = "message";

/// Record subkind retained alongside the empty subkind.
const SUBKIND_FILE_SHARE: &str = "file_share";

/// Inline mention token: `<@` + 9 alphanumerics + optional `|suffix` + `>`.
const MENTION_PATTERN: &str = r"<@[a-zA-Z0-9]{9}(\|[a-zA-Z0-9._]+)?>";

/// One raw event as decoded from a channel's record file.
///
/// Slack records carry many more fields; everything the pipeline does not
/// consume is ignored, and absent fields default to empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    /// Opaque author identifier.
    #[serde(default)]
    pub user: String,

    /// Record kind, e.g. `message`.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Record subkind; empty for plain messages.
    #[serde(default)]
    pub subtype: String,

    /// Raw message body.
    #[serde(default)]
    pub text: String,

    /// Fixed-point timestamp, `seconds.microseconds` since the Unix epoch.
    #[serde(default)]
    pub ts: String,
}

/// A record after filtering, resolution and rewriting.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedMessage {
    /// Author short handle (empty when the id is unknown).
    pub author: String,

    /// Original record kind, retained for traceability.
    pub kind: String,

    /// Original record subkind, retained for traceability.
    pub subtype: String,

    /// Body text with mention tokens rewritten.
    pub text: String,

    /// Absolute timestamp in the configured timezone.
    pub timestamp: DateTime<FixedOffset>,
}

/// Transforms raw records for one export run.
///
/// Borrows the [`MetadataIndex`] loaded from the archive sidecars and owns
/// the compiled mention pattern.
pub struct MessageTransformer<'a> {
    index: &'a MetadataIndex,
    timezone: Timezone,
    mention: Regex,
}

impl<'a> MessageTransformer<'a> {
    /// Creates a transformer over the given metadata, rendering timestamps
    /// in `timezone`.
    pub fn new(index: &'a MetadataIndex, timezone: Timezone) -> Self {
        let mention = Regex::new(MENTION_PATTERN).expect("mention pattern is valid");
        Self {
            index,
            timezone,
            mention,
        }
    }

    /// Transforms one record.
    ///
    /// Returns `Ok(None)` for records the filter drops. Structural problems
    /// (a non-numeric timestamp) are errors; an unknown author id is not.
    pub fn transform(&self, record: &Record) -> Result<Option<TransformedMessage>> {
        if !Self::retains(record) {
            return Ok(None);
        }

        let timestamp = self.parse_timestamp(&record.ts)?;
        let author = self.index.short_handle(&record.user).to_string();
        let text = self.rewrite_mentions(&record.text);

        Ok(Some(TransformedMessage {
            author,
            kind: record.kind.clone(),
            subtype: record.subtype.clone(),
            text,
            timestamp,
        }))
    }

    /// Filter: plain messages and file shares only.
    fn retains(record: &Record) -> bool {
        record.kind == KIND_MESSAGE
            && (record.subtype.is_empty() || record.subtype == SUBKIND_FILE_SHARE)
    }

    /// Parses the integer-seconds portion of a `seconds.micros` timestamp
    /// and converts it into the configured timezone.
    fn parse_timestamp(&self, ts: &str) -> Result<DateTime<FixedOffset>> {
        let seconds = ts.split('.').next().unwrap_or(ts);
        let seconds: i64 = seconds
            .parse()
            .map_err(|_| SlackhistError::malformed_timestamp(ts))?;
        let utc = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| SlackhistError::malformed_timestamp(ts))?;
        Ok(self.timezone.localize(utc))
    }

    /// Replaces every mention token with `@` + the resolved short handle.
    ///
    /// The pipe-delimited display suffix inside a token is always discarded;
    /// only the identifier is resolved. Unknown ids substitute an empty
    /// handle, leaving a bare `@`.
    fn rewrite_mentions(&self, text: &str) -> String {
        self.mention
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let token = &caps[0];
                let inner = &token[2..token.len() - 1];
                let id = inner.split('|').next().unwrap_or(inner);
                format!("@{}", self.index.short_handle(id))
            })
            .into_owned()
    }
}
