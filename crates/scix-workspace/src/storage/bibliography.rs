//! Deduplicated, persisted bibliography.

use std::sync::Arc;

use super::KeyValueStore;
use crate::backend::ExportGateway;
use crate::error::{WorkspaceError, WorkspaceResult};
use crate::models::BibliographyEntry;

/// Storage key holding the JSON array of entries.
pub const BIBLIOGRAPHY_KEY: &str = "scix_bibliography";

/// The user's saved papers, unique by bibcode.
///
/// Every call reads the persisted array, so two stores over the same
/// backend always agree.
#[derive(Clone)]
pub struct BibliographyStore {
    store: Arc<dyn KeyValueStore>,
}

impl BibliographyStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All entries in insertion order.
    ///
    /// Corrupt persisted data reads as an empty bibliography.
    pub fn list(&self) -> WorkspaceResult<Vec<BibliographyEntry>> {
        match self.try_list() {
            Err(WorkspaceError::PersistenceCorrupt(reason)) => {
                tracing::warn!(%reason, "Stored bibliography is corrupt, treating as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// All entries, surfacing corrupt data as [`WorkspaceError::PersistenceCorrupt`].
    ///
    /// Only a value that is not a JSON array is corrupt. Individual entries
    /// that cannot be read are skipped so the rest survive the next write.
    pub fn try_list(&self) -> WorkspaceResult<Vec<BibliographyEntry>> {
        let data = match self.store.get(BIBLIOGRAPHY_KEY)? {
            Some(data) if !data.is_empty() => data,
            _ => return Ok(Vec::new()),
        };

        let raw: Vec<serde_json::Value> = serde_json::from_str(&data)
            .map_err(|e| WorkspaceError::PersistenceCorrupt(e.to_string()))?;

        Ok(raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<BibliographyEntry>(value) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping unreadable bibliography entry");
                    None
                }
            })
            .collect())
    }

    /// Entries newest first, for display.
    pub fn list_recent_first(&self) -> WorkspaceResult<Vec<BibliographyEntry>> {
        let mut entries = self.list()?;
        // Stable sort keeps insertion order among equal timestamps.
        entries.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        Ok(entries)
    }

    /// Add an entry. Returns `false`, changing nothing, if the bibcode is already saved.
    pub fn add(&self, entry: BibliographyEntry) -> WorkspaceResult<bool> {
        let mut entries = self.list()?;
        if entries.iter().any(|e| e.bibcode == entry.bibcode) {
            tracing::debug!(bibcode = %entry.bibcode, "Already in bibliography");
            return Ok(false);
        }

        tracing::debug!(bibcode = %entry.bibcode, "Adding to bibliography");
        entries.push(entry);
        self.save(&entries)?;
        Ok(true)
    }

    /// Remove an entry; removing a bibcode that is not saved is a no-op.
    pub fn remove(&self, bibcode: &str) -> WorkspaceResult<()> {
        let entries: Vec<_> =
            self.list()?.into_iter().filter(|e| e.bibcode != bibcode).collect();
        self.save(&entries)
    }

    /// Remove every entry.
    pub fn clear(&self) -> WorkspaceResult<()> {
        self.store.remove(BIBLIOGRAPHY_KEY)
    }

    /// Check whether a bibcode is saved.
    pub fn contains(&self, bibcode: &str) -> WorkspaceResult<bool> {
        Ok(self.list()?.iter().any(|e| e.bibcode == bibcode))
    }

    /// Number of saved entries.
    pub fn len(&self) -> WorkspaceResult<usize> {
        Ok(self.list()?.len())
    }

    /// Check whether nothing is saved.
    pub fn is_empty(&self) -> WorkspaceResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Render the whole bibliography, in insertion order, with one export call.
    pub async fn export_all(
        &self,
        gateway: &dyn ExportGateway,
        format: &str,
    ) -> WorkspaceResult<String> {
        let bibcodes: Vec<String> = self.list()?.into_iter().map(|e| e.bibcode).collect();
        if bibcodes.is_empty() {
            return Err(WorkspaceError::EmptyBibliography);
        }

        tracing::info!(format, count = bibcodes.len(), "Exporting bibliography");
        Ok(gateway.export(&bibcodes, format).await?)
    }

    fn save(&self, entries: &[BibliographyEntry]) -> WorkspaceResult<()> {
        let data = serde_json::to_string(entries)
            .map_err(|e| WorkspaceError::Persistence(e.to_string()))?;
        self.store.set(BIBLIOGRAPHY_KEY, &data)
    }
}

impl std::fmt::Debug for BibliographyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BibliographyStore").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn entry(bibcode: &str, added_at: i64) -> BibliographyEntry {
        BibliographyEntry {
            bibcode: bibcode.to_string(),
            title: format!("Title {bibcode}"),
            authors: "Smith, J.".to_string(),
            year: "2020".to_string(),
            added_at,
        }
    }

    fn store() -> (Arc<MemoryStore>, BibliographyStore) {
        let backend = Arc::new(MemoryStore::new());
        let bib = BibliographyStore::new(backend.clone());
        (backend, bib)
    }

    #[test]
    fn test_add_is_idempotent() {
        let (_, bib) = store();
        assert!(bib.add(entry("A", 1)).unwrap());
        assert!(!bib.add(entry("A", 2)).unwrap());
        assert_eq!(bib.len().unwrap(), 1);
        assert_eq!(bib.list().unwrap()[0].added_at, 1);
    }

    #[test]
    fn test_remove_then_contains() {
        let (_, bib) = store();
        bib.add(entry("A", 1)).unwrap();
        bib.add(entry("B", 2)).unwrap();

        bib.remove("A").unwrap();
        assert!(!bib.contains("A").unwrap());
        assert!(bib.contains("B").unwrap());

        bib.remove("missing").unwrap();
        assert_eq!(bib.list().unwrap(), vec![entry("B", 2)]);
    }

    #[test]
    fn test_clear_empties() {
        let (_, bib) = store();
        bib.add(entry("A", 1)).unwrap();
        bib.clear().unwrap();
        assert!(bib.is_empty().unwrap());
        assert!(bib.list().unwrap().is_empty());
    }

    #[test]
    fn test_recent_first_ordering() {
        let (_, bib) = store();
        bib.add(entry("old", 10)).unwrap();
        bib.add(entry("new", 30)).unwrap();
        bib.add(entry("mid", 20)).unwrap();

        let order: Vec<_> =
            bib.list_recent_first().unwrap().into_iter().map(|e| e.bibcode).collect();
        assert_eq!(order, vec!["new", "mid", "old"]);

        let insertion: Vec<_> = bib.list().unwrap().into_iter().map(|e| e.bibcode).collect();
        assert_eq!(insertion, vec!["old", "new", "mid"]);
    }

    #[test]
    fn test_corrupt_data_reads_as_empty() {
        let (backend, bib) = store();
        backend.set(BIBLIOGRAPHY_KEY, "[{\"bibcode\":").unwrap();

        assert!(bib.list().unwrap().is_empty());
        assert!(matches!(bib.try_list(), Err(WorkspaceError::PersistenceCorrupt(_))));

        // Adding overwrites the corrupt value with a valid array.
        assert!(bib.add(entry("A", 1)).unwrap());
        assert_eq!(bib.try_list().unwrap().len(), 1);
    }

    #[test]
    fn test_unreadable_entry_does_not_hide_the_rest() {
        let (backend, bib) = store();
        backend
            .set(
                BIBLIOGRAPHY_KEY,
                r#"[
                    {"bibcode": "A", "title": "Kept", "authors": "Smith, J.", "year": "2020", "addedAt": 1},
                    {"bibcode": "B"},
                    {"bibcode": 42, "title": "No usable bibcode"},
                    {"bibcode": "C", "title": "Odd year", "year": 2021, "addedAt": 3}
                ]"#,
            )
            .unwrap();

        let bibcodes: Vec<_> = bib.try_list().unwrap().into_iter().map(|e| e.bibcode).collect();
        assert_eq!(bibcodes, vec!["A", "B"]);

        // Writing back keeps every readable entry.
        assert!(bib.add(entry("D", 4)).unwrap());
        let bibcodes: Vec<_> = bib.list().unwrap().into_iter().map(|e| e.bibcode).collect();
        assert_eq!(bibcodes, vec!["A", "B", "D"]);
        assert_eq!(bib.list().unwrap()[1].added_at, 0);
    }

    #[test]
    fn test_persisted_shape_matches_storage_format() {
        let (backend, bib) = store();
        bib.add(entry("A", 7)).unwrap();

        let raw = backend.get(BIBLIOGRAPHY_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["bibcode"], "A");
        assert_eq!(json[0]["addedAt"], 7);
    }
}
