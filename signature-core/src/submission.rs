//! The signature value a host form submits and stores.
//!
//! The host persists this text verbatim. These helpers cover what the host
//! asks of it: emptiness for "submission made" checks, a word count for
//! update events, a shortened summary for status tables, and a file name
//! for downloads.

use serde::{Deserialize, Serialize};

use crate::error::CaptureResult;
use crate::snapshot::{ImageFormat, Snapshot};

/// Default summary length for status tables.
pub const SUMMARY_CHARS: usize = 140;

const FILE_STEM: &str = "signature";

/// Text value of a signature form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignaturePayload {
    text: String,
}

impl SignaturePayload {
    /// Wrap raw field text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the field value for a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(snapshot.to_data_uri())
    }

    /// Carry over a value from a legacy assignment record. Missing values become empty.
    #[must_use]
    pub fn from_legacy(text: Option<String>) -> Self {
        Self::new(text.unwrap_or_default())
    }

    /// The raw field text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the field holds nothing but whitespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whitespace-separated word count.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// The trimmed text cut to at most `max_chars` characters, with `...` when cut.
    #[must_use]
    pub fn summary(&self, max_chars: usize) -> String {
        let trimmed = self.text.trim();
        if trimmed.chars().count() <= max_chars {
            return trimmed.to_string();
        }
        let mut short: String = trimmed.chars().take(max_chars).collect();
        short.push_str("...");
        short
    }

    /// Decode the stored data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a decodable data URI.
    pub fn to_snapshot(&self) -> CaptureResult<Snapshot> {
        Snapshot::from_data_uri(&self.text)
    }

    /// File name for downloading the stored image.
    #[must_use]
    pub fn file_name(&self) -> String {
        let format = self
            .to_snapshot()
            .map_or(ImageFormat::Png, |s| match s.format() {
                ImageFormat::Unknown => ImageFormat::Png,
                known => known,
            });
        format!("{FILE_STEM}.{}", format.extension())
    }
}

impl From<String> for SignaturePayload {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SurfaceSize;

    fn png_payload() -> SignaturePayload {
        let snapshot = Snapshot::new(
            ImageFormat::Png,
            SurfaceSize::new(1, 1),
            vec![0x89, 0x50, 0x4E, 0x47],
        );
        SignaturePayload::from_snapshot(&snapshot)
    }

    #[test]
    fn snapshot_payload_is_single_word() {
        let payload = png_payload();
        assert!(payload.as_str().starts_with("data:image/png;base64,"));
        assert!(!payload.is_empty());
        assert_eq!(payload.word_count(), 1);
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(SignaturePayload::new("  \n\t ").is_empty());
        assert!(SignaturePayload::default().is_empty());
    }

    #[test]
    fn legacy_missing_value_becomes_empty() {
        let payload = SignaturePayload::from_legacy(None);
        assert_eq!(payload.as_str(), "");
        assert!(payload.is_empty());

        let kept = SignaturePayload::from_legacy(Some("data:,x".to_string()));
        assert_eq!(kept.as_str(), "data:,x");
    }

    #[test]
    fn summary_cuts_long_text() {
        let payload = SignaturePayload::new(format!("  {}  ", "a".repeat(200)));
        let summary = payload.summary(SUMMARY_CHARS);
        assert_eq!(summary.chars().count(), SUMMARY_CHARS + 3);
        assert!(summary.ends_with("..."));

        let short = SignaturePayload::new(" short ");
        assert_eq!(short.summary(SUMMARY_CHARS), "short");
    }

    #[test]
    fn file_name_follows_encoding() {
        assert_eq!(png_payload().file_name(), "signature.png");
        assert_eq!(
            SignaturePayload::new("data:image/jpeg;base64,/9j/").file_name(),
            "signature.jpg"
        );
        assert_eq!(SignaturePayload::new("garbage").file_name(), "signature.png");
    }

    #[test]
    fn payload_round_trips_snapshot_bytes() {
        let snapshot = png_payload().to_snapshot().expect("decode");
        assert_eq!(snapshot.as_bytes(), &[0x89, 0x50, 0x4E, 0x47]);
    }
}
