mod entries;

use std::str::FromStr;

use shared::{AdvisoryView, ClassLabel};

/// Static educational and treatment text for one label.
#[derive(Debug)]
pub struct AdvisoryEntry {
    pub label: ClassLabel,
    pub image_path: &'static str,
    pub alternate_names: &'static str,
    pub cause: &'static str,
    pub symptoms: &'static [&'static str],
    pub treatment: &'static [&'static str],
    pub prevention: &'static str,
    pub quick_advice: &'static str,
}

impl AdvisoryEntry {
    pub fn to_view(&self, assets_url: &str) -> AdvisoryView {
        AdvisoryView {
            label: self.label,
            short_name: self.label.short_name().to_string(),
            alternate_names: self.alternate_names.to_string(),
            cause: self.cause.to_string(),
            symptoms: self.symptoms.iter().map(|s| s.to_string()).collect(),
            treatment: self.treatment.iter().map(|s| s.to_string()).collect(),
            prevention: self.prevention.to_string(),
            quick_advice: self.quick_advice.to_string(),
            image_url: format!("{}/{}", assets_url.trim_end_matches('/'), self.image_path),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("unknown label: {0:?}")]
    UnknownLabel(String),
}

#[derive(Debug, Clone, Copy)]
pub struct KnowledgeBase {
    entries: &'static [AdvisoryEntry],
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    pub fn builtin() -> Self {
        Self {
            entries: &entries::ENTRIES,
        }
    }

    pub fn lookup(&self, label: ClassLabel) -> &'static AdvisoryEntry {
        // Table order matches `ClassLabel::ALL`, checked by the tests below.
        &self.entries[label.index()]
    }

    pub fn lookup_str(&self, label: &str) -> Result<&'static AdvisoryEntry, KnowledgeError> {
        ClassLabel::from_str(label)
            .map(|l| self.lookup(l))
            .map_err(|_| KnowledgeError::UnknownLabel(label.to_string()))
    }

    pub fn entries(&self) -> &'static [AdvisoryEntry] {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn exactly_one_entry_per_label_in_table_order() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.entries().len(), ClassLabel::ALL.len());

        let mut seen = HashSet::new();
        for (i, entry) in kb.entries().iter().enumerate() {
            assert_eq!(entry.label, ClassLabel::ALL[i]);
            assert!(seen.insert(entry.label), "duplicate entry for {}", entry.label);
        }
    }

    #[test]
    fn every_entry_is_filled_in() {
        let kb = KnowledgeBase::builtin();
        for label in ClassLabel::ALL {
            let entry = kb.lookup(label);
            assert_eq!(entry.label, label);
            assert!(!entry.image_path.is_empty());
            assert!(!entry.alternate_names.is_empty());
            assert!(!entry.cause.is_empty());
            assert!(!entry.symptoms.is_empty());
            assert!(!entry.treatment.is_empty());
            assert!(!entry.prevention.is_empty());
            assert!(!entry.quick_advice.is_empty());
            assert!(entry.symptoms.iter().chain(entry.treatment).all(|s| !s.trim().is_empty()));
        }
    }

    #[test]
    fn lookup_str_is_exact() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.lookup_str("Parasitic diseases").unwrap().label,
            ClassLabel::ParasiticDiseases
        );
        assert!(matches!(
            kb.lookup_str("parasitic diseases"),
            Err(KnowledgeError::UnknownLabel(_))
        ));
        assert!(kb.lookup_str("Koi herpes").is_err());
    }

    #[test]
    fn view_joins_asset_url() {
        let view = KnowledgeBase::builtin()
            .lookup(ClassLabel::HealthyFish)
            .to_view("/assets/");
        assert_eq!(view.image_url, "/assets/image/healty.jpg");
        assert_eq!(view.short_name, "Healthy");
    }
}
