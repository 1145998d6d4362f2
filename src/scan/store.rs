use crate::taxonomy::{Category, HashKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Deduplicated findings for one scan cycle.
#[derive(Debug, Default, Clone)]
pub struct ResultStore {
    categories: BTreeMap<Category, BTreeSet<String>>,
    hashes: BTreeMap<HashKind, BTreeSet<String>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only when the finding was not already present.
    pub fn insert(&mut self, category: Category, finding: impl Into<String>) -> bool {
        self.categories.entry(category).or_default().insert(finding.into())
    }

    pub fn insert_hash(&mut self, kind: HashKind, finding: impl Into<String>) -> bool {
        self.hashes.entry(kind).or_default().insert(finding.into())
    }

    pub fn contains(&self, category: Category, finding: &str) -> bool {
        self.categories
            .get(&category)
            .map(|set| set.contains(finding))
            .unwrap_or(false)
    }

    pub fn len(&self, category: Category) -> usize {
        self.categories.get(&category).map(BTreeSet::len).unwrap_or(0)
    }

    pub fn hash_len(&self, kind: HashKind) -> usize {
        self.hashes.get(&kind).map(BTreeSet::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(BTreeSet::is_empty) && self.hashes.values().all(BTreeSet::is_empty)
    }

    pub fn clear(&mut self) {
        self.categories.clear();
        self.hashes.clear();
    }

    /// Number of categories holding at least one finding. The hash
    /// sub-store counts once.
    pub fn non_empty_categories(&self) -> usize {
        let plain = self.categories.values().filter(|set| !set.is_empty()).count();
        let hashes = usize::from(self.hashes.values().any(|set| !set.is_empty()));
        plain + hashes
    }

    /// Owned copy for emission. Every category is present, empty or not.
    pub fn snapshot(&self) -> CategoryMap {
        let categories = Category::ALL
            .iter()
            .map(|c| {
                let items = self
                    .categories
                    .get(c)
                    .map(|set| set.iter().cloned().collect())
                    .unwrap_or_default();
                (*c, items)
            })
            .collect();
        let hashes = HashKind::ALL
            .iter()
            .map(|k| {
                let items = self
                    .hashes
                    .get(k)
                    .map(|set| set.iter().cloned().collect())
                    .unwrap_or_default();
                (*k, items)
            })
            .collect();

        CategoryMap { categories, hashes }
    }
}

/// Wire form of the result store: `{ "domains": [...], ..., "hashes": { "md5": [...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryMap {
    #[serde(flatten)]
    pub categories: BTreeMap<Category, Vec<String>>,
    pub hashes: BTreeMap<HashKind, Vec<String>>,
}

impl CategoryMap {
    pub fn get(&self, category: Category) -> &[String] {
        self.categories.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn hashes(&self, kind: HashKind) -> &[String] {
        self.hashes.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn non_empty_categories(&self) -> usize {
        let plain = self.categories.values().filter(|v| !v.is_empty()).count();
        plain + usize::from(self.hashes.values().any(|v| !v.is_empty()))
    }

    /// True when every finding in `other` is also present here.
    pub fn dominates(&self, other: &CategoryMap) -> bool {
        other
            .categories
            .iter()
            .all(|(c, items)| items.iter().all(|i| self.get(*c).contains(i)))
            && other
                .hashes
                .iter()
                .all(|(k, items)| items.iter().all(|i| self.hashes(*k).contains(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_only_new_entries() {
        let mut store = ResultStore::new();
        assert!(store.insert(Category::Email, "a@b.com"));
        assert!(!store.insert(Category::Email, "a@b.com"));
        assert!(store.insert(Category::Domain, "a@b.com"));
        assert_eq!(store.len(Category::Email), 1);
    }

    #[test]
    fn test_non_empty_counts_hashes_once() {
        let mut store = ResultStore::new();
        store.insert_hash(HashKind::Md5, "d41d8cd98f00b204e9800998ecf8427e");
        store.insert_hash(HashKind::Sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        store.insert(Category::Phone, "13912345678");
        assert_eq!(store.non_empty_categories(), 2);
        assert_eq!(store.snapshot().non_empty_categories(), 2);
    }

    #[test]
    fn test_snapshot_serializes_wire_names() {
        let mut store = ResultStore::new();
        store.insert(Category::InternalIp, "192.168.1.100");
        store.insert_hash(HashKind::Sha256, "x");
        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["internalIps"][0], "192.168.1.100");
        assert_eq!(json["hashes"]["sha256"][0], "x");
        assert!(json["domains"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut store = ResultStore::new();
        store.insert(Category::Jwt, "eyJ...");
        store.insert_hash(HashKind::Md5, "x");
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.non_empty_categories(), 0);
    }
}
