//! Per-channel assembly and ordering.
//!
//! [`ChannelAssembler`] accumulates transformed messages in per-channel
//! buckets as record files are processed, then hands the emission boundary
//! a presentation-ordered view: channels ascending lexicographically,
//! messages within a channel descending by timestamp (most recent first).
//!
//! Ingestion order is archive-entry order and is intentionally re-sorted
//! here; the descending order is a presentation contract only.

use std::collections::BTreeMap;

use crate::transform::TransformedMessage;

/// Accumulates messages per channel for one export run.
///
/// Buckets are created lazily and only ever appended to; the whole
/// collection is discarded once the workbook has been emitted.
#[derive(Debug, Default)]
pub struct ChannelAssembler {
    buckets: BTreeMap<String, Vec<TransformedMessage>>,
}

impl ChannelAssembler {
    /// Creates an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a channel, creating an empty bucket if absent.
    ///
    /// Channels with no retained messages still get a (blank) sheet.
    pub fn register(&mut self, channel: impl Into<String>) {
        self.buckets.entry(channel.into()).or_default();
    }

    /// Appends a message to a channel's bucket, creating it if absent.
    pub fn append(&mut self, channel: impl Into<String>, message: TransformedMessage) {
        self.buckets.entry(channel.into()).or_default().push(message);
    }

    /// Number of registered channels.
    pub fn channel_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of retained messages across all channels.
    pub fn message_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Consumes the assembler and returns the presentation ordering:
    /// channels ascending by name, messages descending by timestamp.
    ///
    /// The sort is stable, so messages sharing a timestamp keep their
    /// ingestion order relative to each other.
    pub fn finalize(self) -> Vec<(String, Vec<TransformedMessage>)> {
        self.buckets
            .into_iter()
            .map(|(channel, mut messages)| {
                messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                (channel, messages)
            })
            .collect()
    }
}
