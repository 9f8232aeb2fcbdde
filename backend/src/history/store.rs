use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use image::{DynamicImage, ImageFormat};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use shared::ClassLabel;

use super::artifact::{ArtifactName, TIMESTAMP_FORMAT, bare_stem, has_image_extension};

/// What `record` does when the canonical name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Same second and same label replaces the earlier artifact.
    #[default]
    Overwrite,
    /// Append `-N` to the time token until the name is free.
    Sequence,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "sequence" => Ok(CollisionPolicy::Sequence),
            other => Err(format!(
                "unknown collision policy '{}', expected 'overwrite' or 'sequence'",
                other
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history artifact not found: {0}")]
    NotFound(String),
    #[error("invalid history id: {0:?}")]
    InvalidId(String),
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history image error: {0}")]
    Image(#[from] image::ImageError),
}

/// One listed artifact with the metadata parsed from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub id: String,
    pub label: String,
    pub captured_at: Option<NaiveDateTime>,
    pub sequence: u32,
}

impl HistoryRecord {
    pub fn from_file_name(file_name: &str) -> Self {
        match ArtifactName::parse(file_name) {
            Ok(name) => Self {
                id: file_name.to_string(),
                label: name.label,
                captured_at: Some(name.captured_at),
                sequence: name.sequence,
            },
            Err(e) => {
                debug!("History file {:?} is not a detection artifact: {}", file_name, e);
                Self {
                    id: file_name.to_string(),
                    label: bare_stem(file_name),
                    captured_at: None,
                    sequence: 0,
                }
            }
        }
    }

    pub fn timestamp(&self) -> Option<String> {
        self.captured_at
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn display_time(&self) -> String {
        self.captured_at
            .map(|t| t.format("%d %B %Y, %H:%M").to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn order_key(&self) -> (String, u32, &str) {
        match self.timestamp() {
            Some(ts) => (ts, self.sequence, self.id.as_str()),
            None => (self.id.clone(), 0, self.id.as_str()),
        }
    }
}

/// Detection history kept as image files in one directory, with the
/// timestamp and label encoded in each file name.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
    policy: CollisionPolicy,
}

impl HistoryStore {
    pub fn open(dir: impl Into<PathBuf>, policy: CollisionPolicy) -> Result<Self, HistoryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!(
            "History store at {} (collision policy: {:?})",
            dir.display(),
            policy
        );
        Ok(Self { dir, policy })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `image` re-encoded as JPEG and return the new artifact id.
    pub fn record(
        &self,
        image: &DynamicImage,
        label: ClassLabel,
        captured_at: NaiveDateTime,
    ) -> Result<String, HistoryError> {
        let captured_at = captured_at.with_nanosecond(0).unwrap_or(captured_at);
        let name = self.next_name(captured_at, label);
        let id = name.file_name();

        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut buffer, ImageFormat::Jpeg)?;

        fs::create_dir_all(&self.dir)?;
        let tmp_path = self.dir.join(format!(".{}.tmp", id));
        let final_path = self.dir.join(&id);
        let written =
            fs::write(&tmp_path, buffer.into_inner()).and_then(|()| fs::rename(&tmp_path, &final_path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                debug!("Could not remove {}: {}", tmp_path.display(), cleanup);
            }
            return Err(e.into());
        }

        info!("Recorded detection {:?}", id);
        Ok(id)
    }

    fn next_name(&self, captured_at: NaiveDateTime, label: ClassLabel) -> ArtifactName {
        let mut name = ArtifactName::new(captured_at, label, 0);
        if self.policy == CollisionPolicy::Overwrite {
            return name;
        }
        while self.dir.join(name.file_name()).exists() {
            name.sequence += 1;
        }
        name
    }

    /// All image artifacts, newest first.
    pub fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("History directory {} is missing", self.dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                warn!("Skipping non UTF-8 history file {:?}", entry.path());
                continue;
            };
            if file_name.starts_with('.') || !has_image_extension(file_name) {
                continue;
            }
            records.push(HistoryRecord::from_file_name(file_name));
        }

        records.sort_by(|a, b| b.order_key().cmp(&a.order_key()));
        Ok(records)
    }

    pub fn path_of(&self, id: &str) -> Result<PathBuf, HistoryError> {
        validate_id(id)?;
        Ok(self.dir.join(id))
    }

    pub fn delete(&self, id: &str) -> Result<(), HistoryError> {
        let path = self.path_of(id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted history artifact {:?}", id);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(HistoryError::NotFound(id.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Ids name listed artifacts only: bare, visible image file names.
fn validate_id(id: &str) -> Result<(), HistoryError> {
    let is_bare_name = !id.is_empty()
        && !id.starts_with('.')
        && !id.contains(['/', '\\'])
        && Path::new(id).file_name().and_then(|n| n.to_str()) == Some(id);
    if is_bare_name && has_image_extension(id) {
        Ok(())
    } else {
        Err(HistoryError::InvalidId(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn create_test_store(policy: CollisionPolicy) -> (HistoryStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::open(dir.path().join("riwayat_upload"), policy).unwrap();
        (store, dir)
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn solid(color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 24, Rgb(color)))
    }

    fn ids(records: &[HistoryRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn open_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("history");
        let store = HistoryStore::open(&path, CollisionPolicy::Overwrite).unwrap();
        assert!(path.is_dir());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn record_then_list_round_trips_label_and_time() {
        let (store, _dir) = create_test_store(CollisionPolicy::Overwrite);
        let t = at(2024, 3, 9, 14, 30, 5);

        let id = store.record(&solid([0, 128, 255]), ClassLabel::HealthyFish, t).unwrap();
        assert_eq!(id, "20240309_143005_Healthy Fish.jpg");

        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].label, "Healthy Fish");
        assert_eq!(records[0].captured_at, Some(t));
        assert_eq!(records[0].display_time(), "09 March 2024, 14:30");
    }

    #[test]
    fn stores_image_at_upload_resolution() {
        let (store, _dir) = create_test_store(CollisionPolicy::Overwrite);
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(640, 360, Rgba([1, 2, 3, 128])));

        let id = store
            .record(&rgba, ClassLabel::ParasiticDiseases, at(2024, 1, 1, 0, 0, 0))
            .unwrap();

        let saved = image::open(store.path_of(&id).unwrap()).unwrap();
        assert_eq!(saved.dimensions(), (640, 360));
    }

    #[test]
    fn same_second_same_label_overwrites() {
        let (store, _dir) = create_test_store(CollisionPolicy::Overwrite);
        let t = at(2024, 1, 1, 10, 0, 0);

        let first = store.record(&solid([255, 0, 0]), ClassLabel::HealthyFish, t).unwrap();
        let second = store.record(&solid([0, 0, 255]), ClassLabel::HealthyFish, t).unwrap();
        assert_eq!(first, second);

        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);

        let saved = image::open(store.path_of(&second).unwrap()).unwrap().to_rgb8();
        let pixel = saved.get_pixel(16, 12);
        assert!(pixel[2] > 200 && pixel[0] < 50, "expected the blue image, got {:?}", pixel);
    }

    #[test]
    fn sequence_policy_keeps_both_and_lists_newest_first() {
        let (store, _dir) = create_test_store(CollisionPolicy::Sequence);
        let t = at(2024, 1, 1, 10, 0, 0);

        let first = store.record(&solid([255, 0, 0]), ClassLabel::HealthyFish, t).unwrap();
        let second = store.record(&solid([0, 0, 255]), ClassLabel::HealthyFish, t).unwrap();
        let third = store.record(&solid([0, 255, 0]), ClassLabel::HealthyFish, t).unwrap();

        assert_eq!(first, "20240101_100000_Healthy Fish.jpg");
        assert_eq!(second, "20240101_100000-1_Healthy Fish.jpg");
        assert_eq!(third, "20240101_100000-2_Healthy Fish.jpg");

        let records = store.list().unwrap();
        assert_eq!(ids(&records), vec![third.as_str(), second.as_str(), first.as_str()]);
        assert!(records.iter().all(|r| r.label == "Healthy Fish"));
        assert!(records.iter().all(|r| r.captured_at == Some(t)));
    }

    #[test]
    fn lists_in_reverse_chronological_order() {
        let (store, _dir) = create_test_store(CollisionPolicy::Overwrite);
        for t in [
            at(2024, 1, 1, 12, 0, 0),
            at(2024, 1, 2, 9, 0, 0),
            at(2024, 1, 1, 10, 0, 0),
        ] {
            store.record(&solid([9, 9, 9]), ClassLabel::BacterialGillDisease, t).unwrap();
        }

        let timestamps: Vec<String> = store
            .list()
            .unwrap()
            .iter()
            .map(|r| r.timestamp().unwrap())
            .collect();
        assert_eq!(
            timestamps,
            vec!["20240102_090000", "20240101_120000", "20240101_100000"]
        );
    }

    #[test]
    fn malformed_names_are_listed_with_unknown_time() {
        let (store, _dir) = create_test_store(CollisionPolicy::Overwrite);
        fs::write(store.dir().join("notes.jpg"), b"not really a jpeg").unwrap();
        store
            .record(&solid([1, 1, 1]), ClassLabel::WhiteTailDisease, at(2024, 5, 5, 5, 5, 5))
            .unwrap();

        let records = store.list().unwrap();
        assert_eq!(records.len(), 2);

        let notes = records.iter().find(|r| r.id == "notes.jpg").unwrap();
        assert_eq!(notes.label, "notes");
        assert_eq!(notes.captured_at, None);
        assert_eq!(notes.display_time(), "Unknown");
    }

    #[test]
    fn ignores_hidden_temporary_and_non_image_files() {
        let (store, _dir) = create_test_store(CollisionPolicy::Overwrite);
        fs::write(store.dir().join(".20240101_000000_Healthy Fish.jpg.tmp"), b"partial").unwrap();
        fs::write(store.dir().join("readme.txt"), b"hello").unwrap();
        fs::create_dir(store.dir().join("subdir.jpg")).unwrap();

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn missing_directory_lists_empty() {
        let (store, dir) = create_test_store(CollisionPolicy::Overwrite);
        fs::remove_dir_all(dir.path().join("riwayat_upload")).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn record_recreates_directory_removed_after_open() {
        let (store, dir) = create_test_store(CollisionPolicy::Overwrite);
        fs::remove_dir_all(dir.path().join("riwayat_upload")).unwrap();

        store
            .record(&solid([1, 2, 3]), ClassLabel::HealthyFish, at(2024, 1, 1, 1, 1, 1))
            .unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn delete_removes_then_reports_not_found() {
        let (store, _dir) = create_test_store(CollisionPolicy::Overwrite);
        let id = store
            .record(&solid([5, 5, 5]), ClassLabel::Saprolegniasis, at(2024, 2, 2, 2, 2, 2))
            .unwrap();

        store.delete(&id).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(matches!(store.delete(&id), Err(HistoryError::NotFound(_))));
    }

    #[test]
    fn delete_rejects_paths_outside_the_store() {
        let (store, dir) = create_test_store(CollisionPolicy::Overwrite);
        let outside = dir.path().join("keep.jpg");
        fs::write(&outside, b"x").unwrap();

        for id in ["../keep.jpg", "..", "", ".hidden.jpg", "a/b.jpg", "a\\b.jpg"] {
            assert!(
                matches!(store.delete(id), Err(HistoryError::InvalidId(_))),
                "id {:?} should be rejected",
                id
            );
        }
        assert!(outside.exists());
    }

    #[test]
    fn delete_only_touches_image_artifacts() {
        let (store, _dir) = create_test_store(CollisionPolicy::Overwrite);
        let readme = store.dir().join("readme.txt");
        fs::write(&readme, b"hello").unwrap();

        for id in ["readme.txt", "model999", "notes.jpg.bak"] {
            assert!(
                matches!(store.delete(id), Err(HistoryError::InvalidId(_))),
                "id {:?} should be rejected",
                id
            );
        }
        assert!(readme.exists());
        assert!(matches!(store.delete("gone.JPG"), Err(HistoryError::NotFound(_))));
    }

    #[test]
    fn failed_write_leaves_no_temporary_file() {
        let (store, _dir) = create_test_store(CollisionPolicy::Overwrite);
        let t = at(2024, 1, 1, 0, 0, 0);
        let blocker = store.dir().join("20240101_000000_Healthy Fish.jpg");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), b"x").unwrap();

        assert!(matches!(
            store.record(&solid([1, 1, 1]), ClassLabel::HealthyFish, t),
            Err(HistoryError::Io(_))
        ));

        let leftovers: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "left behind {:?}", leftovers);
    }

    #[test]
    fn parses_collision_policy() {
        assert_eq!(
            "overwrite".parse::<CollisionPolicy>(),
            Ok(CollisionPolicy::Overwrite)
        );
        assert_eq!(
            " Sequence ".parse::<CollisionPolicy>(),
            Ok(CollisionPolicy::Sequence)
        );
        assert!("random".parse::<CollisionPolicy>().is_err());
    }
}
