//! Filesystem session store.
//!
//! Each session is two sibling files under one directory: `<name>.md`
//! (the human-readable transcript) and `<name>.json` (the lossless round
//! record). Names are `round_` plus a zero-padded counter derived from a
//! directory scan; the scan-compute-write-prune sequence runs under one
//! async mutex, so a name is never assigned twice and a session being
//! written is never pruned out from under the writer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use consilium_application::ports::session_store::{PersistedSession, SessionStore, StoreError};
use consilium_domain::{RoundResult, render_transcript};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Fixed session name prefix
const SESSION_PREFIX: &str = "round_";

/// Width of the zero-padded numeric suffix
const SUFFIX_WIDTH: usize = 5;

/// Default retention bound: sessions kept after pruning
pub const DEFAULT_RETENTION: usize = 5;

/// Bounded on-disk store of completed rounds
pub struct FsSessionStore {
    dir: PathBuf,
    retention: usize,
    /// Held across scan, name assignment, write, and prune
    naming: Mutex<()>,
}

impl FsSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            retention: DEFAULT_RETENTION,
            naming: Mutex::new(()),
        }
    }

    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention.max(1);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.md"))
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Parse the numeric suffix out of a session name
    fn suffix_of(name: &str) -> Option<u64> {
        let digits = name.strip_prefix(SESSION_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Scan the directory for session names (either artifact counts)
    async fn scan_names(&self) -> Result<BTreeSet<String>, StoreError> {
        let mut names = BTreeSet::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // A store that was never written to has no sessions
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_artifact = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("md") | Some("json")
            );
            if !is_artifact {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && Self::suffix_of(stem).is_some()
            {
                names.insert(stem.to_string());
            }
        }
        Ok(names)
    }

    /// Newest modification time across a session's artifacts
    async fn modified_at(&self, name: &str) -> Option<SystemTime> {
        let mut newest: Option<SystemTime> = None;
        for path in [self.document_path(name), self.record_path(name)] {
            if let Ok(meta) = tokio::fs::metadata(&path).await
                && let Ok(mtime) = meta.modified()
            {
                newest = Some(newest.map_or(mtime, |n| n.max(mtime)));
            }
        }
        newest
    }

    async fn write_artifacts(&self, name: &str, result: &RoundResult) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let document = render_transcript(result);
        tokio::fs::write(self.document_path(name), document).await?;

        let record = serde_json::to_vec_pretty(result)
            .map_err(|e| StoreError::Malformed(format!("{name}: {e}")))?;
        tokio::fs::write(self.record_path(name), record).await?;
        Ok(())
    }

    /// Prune without taking the naming lock; callers hold it already or
    /// accept best-effort behavior.
    async fn prune_unlocked(&self, keep: usize) -> Result<Vec<String>, StoreError> {
        let names = self.scan_names().await?;
        if names.len() <= keep {
            return Ok(vec![]);
        }

        let mut ranked: Vec<(String, SystemTime)> = Vec::with_capacity(names.len());
        for name in names {
            let mtime = self.modified_at(&name).await.unwrap_or(SystemTime::UNIX_EPOCH);
            ranked.push((name, mtime));
        }
        // Newest first; ties broken by name so ranking is total
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

        let mut deleted = Vec::new();
        for (name, _) in ranked.into_iter().skip(keep) {
            self.remove_artifacts(&name).await;
            deleted.push(name);
        }
        if !deleted.is_empty() {
            info!("Pruned {} old sessions", deleted.len());
        }
        Ok(deleted)
    }

    async fn remove_artifacts(&self, name: &str) {
        for path in [self.document_path(name), self.record_path(name)] {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Could not remove {}: {}", path.display(), e),
            }
        }
    }
}

#[async_trait]
impl SessionStore for FsSessionStore {
    async fn persist_new(&self, result: &RoundResult) -> Result<String, StoreError> {
        let _guard = self.naming.lock().await;

        let max_suffix = self
            .scan_names()
            .await?
            .iter()
            .filter_map(|n| Self::suffix_of(n))
            .max()
            .unwrap_or(0);
        let name = format!(
            "{SESSION_PREFIX}{suffix:0width$}",
            suffix = max_suffix + 1,
            width = SUFFIX_WIDTH
        );

        let mut record = result.clone();
        record.request.session_name = name.clone();
        self.write_artifacts(&name, &record).await?;
        debug!("Session {} written to {}", name, self.dir.display());

        self.prune_unlocked(self.retention).await?;
        Ok(name)
    }

    async fn persist(&self, name: &str, result: &RoundResult) -> Result<(), StoreError> {
        let _guard = self.naming.lock().await;
        self.write_artifacts(name, result).await
    }

    async fn load(&self, name: &str) -> Result<Option<PersistedSession>, StoreError> {
        let document = match tokio::fs::read_to_string(self.document_path(name)).await {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let record = match tokio::fs::read(self.record_path(name)).await {
            Ok(bytes) => Some(
                serde_json::from_slice::<RoundResult>(&bytes)
                    .map_err(|e| StoreError::Malformed(format!("{name}: {e}")))?,
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        if document.is_none() && record.is_none() {
            return Ok(None);
        }

        let modified_at = self.modified_at(name).await.map(DateTime::<Utc>::from);
        Ok(Some(PersistedSession {
            name: name.to_string(),
            document,
            record,
            modified_at,
        }))
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.scan_names().await?.into_iter().collect())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.remove_artifacts(name).await;
        Ok(())
    }

    async fn prune(&self, keep: usize) -> Result<Vec<String>, StoreError> {
        let _guard = self.naming.lock().await;
        self.prune_unlocked(keep).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consilium_domain::{Agenda, AdvisorSpec, MemberResult, Roster, RoundRequest};
    use std::time::Duration;

    fn round_result(agenda: &str) -> RoundResult {
        let lead = AdvisorSpec::new("Lead", "expertise", "goal", "lead", "gpt-5-mini");
        let member = AdvisorSpec::new("Member", "expertise", "goal", "member", "gpt-5-mini");
        let roster = Roster::new(lead, vec![member.clone()]).unwrap();
        let request = RoundRequest::new(Agenda::new(agenda).unwrap(), roster);
        RoundResult::new(
            "## Consensus\nPlan here",
            vec![MemberResult::success(member, "advice")],
            request,
        )
    }

    #[tokio::test]
    async fn test_names_are_sequential() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::new(dir.path());

        assert_eq!(store.persist_new(&round_result("a")).await.unwrap(), "round_00001");
        assert_eq!(store.persist_new(&round_result("b")).await.unwrap(), "round_00002");
    }

    #[tokio::test]
    async fn test_next_name_skips_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::new(dir.path());

        for name in ["round_00001", "round_00002", "round_00004"] {
            store.persist(name, &round_result("seed")).await.unwrap();
        }

        let assigned = store.persist_new(&round_result("new")).await.unwrap();
        assert_eq!(assigned, "round_00005");
    }

    #[tokio::test]
    async fn test_names_never_reused_after_prune() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::new(dir.path()).with_retention(2);

        for _ in 0..4 {
            store.persist_new(&round_result("case")).await.unwrap();
            tokio::time::sleep(Duration::from_millis(15)).await;
        }
        // Retention 2: 00001 and 00002 are gone, but numbering continues
        let assigned = store.persist_new(&round_result("case")).await.unwrap();
        assert_eq!(assigned, "round_00005");
    }

    #[tokio::test]
    async fn test_prune_keeps_most_recently_modified() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::new(dir.path());

        for name in ["round_00001", "round_00002", "round_00003"] {
            store.persist(name, &round_result("seed")).await.unwrap();
            tokio::time::sleep(Duration::from_millis(15)).await;
        }
        // Touch the oldest so it becomes the newest
        store.persist("round_00001", &round_result("updated")).await.unwrap();

        let deleted = store.prune(2).await.unwrap();
        assert_eq!(deleted, vec!["round_00002".to_string()]);

        let remaining = store.list().await.unwrap();
        assert_eq!(remaining, vec!["round_00001", "round_00003"]);
        assert!(store.load("round_00002").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_round_trips_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::new(dir.path());

        let name = store.persist_new(&round_result("chest pain")).await.unwrap();
        let session = store.load(&name).await.unwrap().unwrap();

        let record = session.record.unwrap();
        assert_eq!(record.request.agenda.text(), "chest pain");
        assert_eq!(record.request.session_name, name);
        assert!(session.document.unwrap().contains("## Consensus Summary"));
        assert!(session.modified_at.is_some());
    }

    #[tokio::test]
    async fn test_partial_pair_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::new(dir.path());

        let name = store.persist_new(&round_result("case")).await.unwrap();
        tokio::fs::remove_file(store.record_path(&name)).await.unwrap();

        let session = store.load(&name).await.unwrap().unwrap();
        assert!(session.document.is_some());
        assert!(session.record.is_none());
    }

    #[tokio::test]
    async fn test_missing_session_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::new(dir.path());
        assert!(store.load("round_99999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rewrite_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::new(dir.path());
        let result = round_result("case");

        store.persist("round_00007", &result).await.unwrap();
        let md_first = tokio::fs::read(store.document_path("round_00007")).await.unwrap();
        let json_first = tokio::fs::read(store.record_path("round_00007")).await.unwrap();

        store.persist("round_00007", &result).await.unwrap();
        let md_second = tokio::fs::read(store.document_path("round_00007")).await.unwrap();
        let json_second = tokio::fs::read(store.record_path("round_00007")).await.unwrap();

        assert_eq!(md_first, md_second);
        assert_eq!(json_first, json_second);
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::new(dir.path());
        assert!(store.delete("round_00042").await.is_ok());
    }

    #[tokio::test]
    async fn test_unrelated_files_ignored_by_scan() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::new(dir.path());

        tokio::fs::create_dir_all(dir.path()).await.unwrap();
        tokio::fs::write(dir.path().join("notes.md"), "unrelated").await.unwrap();
        tokio::fs::write(dir.path().join("round_abc.md"), "bad suffix").await.unwrap();

        store.persist_new(&round_result("case")).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec!["round_00001"]);
    }
}
