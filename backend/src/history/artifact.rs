use std::path::Path;

use chrono::NaiveDateTime;
use shared::ClassLabel;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const ARTIFACT_EXTENSION: &str = "jpg";
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Metadata encoded in a history file name:
/// `{YYYYMMDD}_{HHMMSS}[-{sequence}]_{label}.{ext}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    pub captured_at: NaiveDateTime,
    pub sequence: u32,
    pub label: String,
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactNameError {
    #[error("file name has no extension")]
    MissingExtension,
    #[error("expected '<date>_<time>_<label>'")]
    MissingTokens,
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("invalid sequence number '{0}'")]
    InvalidSequence(String),
    #[error("label is empty")]
    EmptyLabel,
}

impl ArtifactName {
    pub fn new(captured_at: NaiveDateTime, label: ClassLabel, sequence: u32) -> Self {
        Self {
            captured_at,
            sequence,
            label: label.as_str().to_string(),
            extension: ARTIFACT_EXTENSION.to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        let timestamp = self.captured_at.format(TIMESTAMP_FORMAT);
        if self.sequence == 0 {
            format!("{}_{}.{}", timestamp, self.label, self.extension)
        } else {
            format!(
                "{}-{}_{}.{}",
                timestamp, self.sequence, self.label, self.extension
            )
        }
    }

    pub fn parse(file_name: &str) -> Result<Self, ArtifactNameError> {
        let path = Path::new(file_name);
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or(ArtifactNameError::MissingExtension)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or(ArtifactNameError::MissingTokens)?;

        let mut parts = stem.splitn(3, '_');
        let (date, time, label) = match (parts.next(), parts.next(), parts.next()) {
            (Some(date), Some(time), Some(label)) => (date, time, label),
            _ => return Err(ArtifactNameError::MissingTokens),
        };

        if label.is_empty() {
            return Err(ArtifactNameError::EmptyLabel);
        }

        let (time, sequence) = match time.split_once('-') {
            Some((time, seq)) => {
                let sequence = seq
                    .parse::<u32>()
                    .ok()
                    .filter(|&s| s > 0)
                    .ok_or_else(|| ArtifactNameError::InvalidSequence(seq.to_string()))?;
                (time, sequence)
            }
            None => (time, 0),
        };

        let timestamp = format!("{}_{}", date, time);
        let well_formed = date.len() == 8
            && time.len() == 6
            && date.bytes().chain(time.bytes()).all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(ArtifactNameError::InvalidTimestamp(timestamp));
        }
        let captured_at = NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT)
            .map_err(|_| ArtifactNameError::InvalidTimestamp(timestamp.clone()))?;

        Ok(Self {
            captured_at,
            sequence,
            label: label.to_string(),
            extension: extension.to_string(),
        })
    }
}

pub fn has_image_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// File name without its extension.
pub fn bare_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .to_string()
}
