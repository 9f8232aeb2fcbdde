pub mod artifact;
pub mod store;

pub use store::{CollisionPolicy, HistoryError, HistoryRecord, HistoryStore};
