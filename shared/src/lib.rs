use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// The closed set of categories the fish disease model predicts.
///
/// Variant order is the model's output index order and must not change.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
    IntoStaticStr,
)]
pub enum ClassLabel {
    #[serde(rename = "Bacterial Red disease")]
    #[strum(serialize = "Bacterial Red disease")]
    BacterialRedDisease,
    #[serde(rename = "Bacterial diseases - Aeromoniasis")]
    #[strum(serialize = "Bacterial diseases - Aeromoniasis")]
    Aeromoniasis,
    #[serde(rename = "Bacterial gill disease")]
    #[strum(serialize = "Bacterial gill disease")]
    BacterialGillDisease,
    #[serde(rename = "Fungal diseases Saprolegniasis")]
    #[strum(serialize = "Fungal diseases Saprolegniasis")]
    Saprolegniasis,
    #[serde(rename = "Healthy Fish")]
    #[strum(serialize = "Healthy Fish")]
    HealthyFish,
    #[serde(rename = "Parasitic diseases")]
    #[strum(serialize = "Parasitic diseases")]
    ParasiticDiseases,
    #[serde(rename = "Viral diseases White tail disease")]
    #[strum(serialize = "Viral diseases White tail disease")]
    WhiteTailDisease,
}

impl ClassLabel {
    pub const ALL: [ClassLabel; 7] = [
        ClassLabel::BacterialRedDisease,
        ClassLabel::Aeromoniasis,
        ClassLabel::BacterialGillDisease,
        ClassLabel::Saprolegniasis,
        ClassLabel::HealthyFish,
        ClassLabel::ParasiticDiseases,
        ClassLabel::WhiteTailDisease,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The verbatim label, as embedded in history file names.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Short name used for the education tabs.
    pub fn short_name(self) -> &'static str {
        match self {
            ClassLabel::BacterialRedDisease => "Red Disease",
            ClassLabel::Aeromoniasis => "Aeromoniasis",
            ClassLabel::BacterialGillDisease => "Gill Disease",
            ClassLabel::Saprolegniasis => "Saprolegniasis",
            ClassLabel::HealthyFish => "Healthy",
            ClassLabel::ParasiticDiseases => "Parasitic",
            ClassLabel::WhiteTailDisease => "White Tail",
        }
    }

    pub fn is_healthy(self) -> bool {
        self == ClassLabel::HealthyFish
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub label: ClassLabel,
    pub probability: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResponse {
    pub label: ClassLabel,
    pub confidence: f32,
    pub confidence_percent: f32,
    /// One score per label, in table order.
    pub distribution: Vec<ClassScore>,
    pub advice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_error: Option<String>,
}

impl DetectionResponse {
    /// Distribution sorted by descending probability, for the confidence chart.
    pub fn ranked(&self) -> Vec<ClassScore> {
        let mut scores = self.distribution.clone();
        scores.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scores
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelInfo {
    pub index: usize,
    pub label: ClassLabel,
    pub short_name: String,
}

impl From<ClassLabel> for LabelInfo {
    fn from(label: ClassLabel) -> Self {
        Self {
            index: label.index(),
            label,
            short_name: label.short_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryView {
    pub label: ClassLabel,
    pub short_name: String,
    pub alternate_names: String,
    pub cause: String,
    pub symptoms: Vec<String>,
    pub treatment: Vec<String>,
    pub prevention: String,
    pub quick_advice: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Parsed label, or the bare file stem when the name is not in the
    /// expected shape.
    pub label: String,
    /// `YYYYMMDD_HHMMSS`, absent when unknown.
    pub captured_at: Option<String>,
    pub display_time: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_error: Option<String>,
    pub history_dir: String,
    pub labels: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}
