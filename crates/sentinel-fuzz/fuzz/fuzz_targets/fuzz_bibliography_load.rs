#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use scix_workspace::storage::{BIBLIOGRAPHY_KEY, BibliographyStore, KeyValueStore, MemoryStore};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let store = Arc::new(MemoryStore::new());
    if store.set(BIBLIOGRAPHY_KEY, text).is_err() {
        return;
    }

    // Whatever is on disk, listing never fails on content
    let bibliography = BibliographyStore::new(store);
    assert!(bibliography.list().is_ok());
});
