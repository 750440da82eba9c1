use crate::error::CrawlerError;
use crate::record::JobRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Crash-safe crawl checkpoint. Both sets only ever grow.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CrawlState {
    #[serde(default)]
    pub completed_pages: BTreeSet<u32>,
    #[serde(default)]
    pub seen_links: HashSet<String>,
}

impl CrawlState {
    pub fn last_completed(&self) -> u32 {
        self.completed_pages.iter().next_back().copied().unwrap_or(0)
    }

    /// Seeds the seen-set from records persisted by an earlier run, so
    /// URLs surviving in the result file are respected too.
    pub fn merge_records(&mut self, records: &[JobRecord]) {
        for record in records {
            if !record.detail_url.is_empty() {
                self.seen_links.insert(record.detail_url.clone());
            }
        }
    }
}

pub struct ResumeStore {
    path: PathBuf,
}

impl ResumeStore {
    pub fn new(path: PathBuf) -> Self {
        ResumeStore { path }
    }

    /// Missing or unparseable checkpoints degrade to an empty state.
    pub fn load(&self) -> CrawlState {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return CrawlState::default();
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!("ignoring corrupt checkpoint {}: {}", self.path.display(), e);
                CrawlState::default()
            }
        }
    }

    /// Full overwrite via temp-file rename, so an interrupted save never
    /// leaves a half-written checkpoint behind.
    pub fn save(&self, state: &CrawlState) -> Result<(), CrawlerError> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(state)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &tempfile::TempDir) -> ResumeStore {
        ResumeStore::new(dir.path().join("resume_state.json"))
    }

    #[test]
    fn missing_checkpoint_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = store_in(&dir).load();
        assert!(state.completed_pages.is_empty());
        assert!(state.seen_links.is_empty());
        assert_eq!(state.last_completed(), 0);
    }

    #[test]
    fn corrupt_checkpoint_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(dir.path().join("resume_state.json"), "{ not json").unwrap();
        assert!(store.load().completed_pages.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut state = CrawlState::default();
        state.completed_pages.insert(2);
        state.completed_pages.insert(1);
        state.seen_links.insert("https://x/1".to_string());
        store.save(&state).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.completed_pages, state.completed_pages);
        assert_eq!(loaded.seen_links, state.seen_links);
        assert_eq!(loaded.last_completed(), 2);
        // No temp file left behind.
        assert!(!dir.path().join("resume_state.tmp").exists());
    }

    #[test]
    fn repeated_saves_overwrite_fully() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut state = CrawlState::default();
        state.completed_pages.insert(1);
        store.save(&state).unwrap();
        state.completed_pages.insert(2);
        state.seen_links.insert("https://x/2".to_string());
        store.save(&state).unwrap();

        let loaded = store.load();
        assert_eq!(
            loaded.completed_pages.iter().copied().collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(loaded.seen_links.contains("https://x/2"));
    }

    #[test]
    fn merge_records_seeds_seen_links() {
        let mut state = CrawlState::default();
        let mut record = JobRecord::fetch_failed("https://x/1", 0.0);
        record.title = "工程师".to_string();
        let no_url = JobRecord::fetch_failed("", 0.0);
        state.merge_records(&[record, no_url]);
        assert_eq!(state.seen_links.len(), 1);
        assert!(state.seen_links.contains("https://x/1"));
    }

    #[test]
    fn checkpoint_accepts_missing_keys() {
        let state: CrawlState = serde_json::from_str(r#"{"completed_pages": [3]}"#).unwrap();
        assert_eq!(state.last_completed(), 3);
        assert!(state.seen_links.is_empty());
    }
}
