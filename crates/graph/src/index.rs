use context_tags::{Tag, TagKind};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

/// Tags extracted from one enumerated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTags {
    pub rel_fname: String,
    pub fname: PathBuf,
    pub tags: Vec<Tag>,
}

impl FileTags {
    pub fn new(rel_fname: impl Into<String>, fname: impl Into<PathBuf>, tags: Vec<Tag>) -> Self {
        Self {
            rel_fname: rel_fname.into(),
            fname: fname.into(),
            tags,
        }
    }
}

/// Cross-file lookup tables built from per-file tags.
///
/// All maps are ordered so iteration never depends on hashing.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    /// identifier -> files defining it
    defines: BTreeMap<String, BTreeSet<String>>,
    /// identifier -> referencing file per reference, in extraction order
    references: BTreeMap<String, Vec<String>>,
    /// (file, identifier) -> its distinct definition tags
    definitions: BTreeMap<(String, String), BTreeSet<Tag>>,
}

impl SymbolIndex {
    /// Merge per-file results into one index
    pub fn from_files(files: &[FileTags]) -> Self {
        let mut index = Self::default();
        for file in files {
            for tag in &file.tags {
                index.insert(&file.rel_fname, tag);
            }
        }
        index
    }

    fn insert(&mut self, rel_fname: &str, tag: &Tag) {
        match tag.kind {
            TagKind::Definition => {
                self.defines
                    .entry(tag.name.clone())
                    .or_default()
                    .insert(rel_fname.to_string());
                self.definitions
                    .entry((rel_fname.to_string(), tag.name.clone()))
                    .or_default()
                    .insert(tag.clone());
            }
            TagKind::Reference => {
                self.references
                    .entry(tag.name.clone())
                    .or_default()
                    .push(rel_fname.to_string());
            }
        }
    }

    /// Identifiers that are both defined and referenced somewhere
    pub fn shared_identifiers(&self) -> impl Iterator<Item = &str> {
        self.defines
            .keys()
            .filter(|ident| self.references.contains_key(*ident))
            .map(String::as_str)
    }

    pub fn defining_files(&self, ident: &str) -> Option<&BTreeSet<String>> {
        self.defines.get(ident)
    }

    /// Referencing files of `ident` with their reference counts, in order
    /// of first reference
    pub fn reference_counts(&self, ident: &str) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        for file in self.references.get(ident).into_iter().flatten() {
            let slot = *slots.entry(file.as_str()).or_insert_with(|| {
                counts.push((file.as_str(), 0));
                counts.len() - 1
            });
            counts[slot].1 += 1;
        }
        counts
    }

    pub fn definitions_of(&self, rel_fname: &str, ident: &str) -> Option<&BTreeSet<Tag>> {
        self.definitions
            .get(&(rel_fname.to_string(), ident.to_string()))
    }

    /// Every distinct definition tag, grouped per (file, identifier)
    pub fn definition_sets(&self) -> impl Iterator<Item = (&(String, String), &BTreeSet<Tag>)> {
        self.definitions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn def(file: &str, line: usize, name: &str) -> Tag {
        Tag::new(file, format!("/r/{file}"), line, name, TagKind::Definition)
    }

    fn reference(file: &str, line: usize, name: &str) -> Tag {
        Tag::new(file, format!("/r/{file}"), line, name, TagKind::Reference)
    }

    fn sample() -> Vec<FileTags> {
        vec![
            FileTags::new(
                "a.py",
                "/r/a.py",
                vec![def("a.py", 0, "foo"), def("a.py", 3, "bar"), def("a.py", 3, "bar")],
            ),
            FileTags::new(
                "b.py",
                "/r/b.py",
                vec![
                    reference("b.py", 2, "foo"),
                    reference("b.py", 3, "foo"),
                    reference("b.py", 4, "print"),
                ],
            ),
            FileTags::new("c.py", "/r/c.py", vec![reference("c.py", 0, "foo")]),
        ]
    }

    #[test]
    fn test_shared_identifiers_need_definition_and_reference() {
        let index = SymbolIndex::from_files(&sample());
        let shared: Vec<_> = index.shared_identifiers().collect();
        assert_eq!(shared, vec!["foo"]);
    }

    #[test]
    fn test_reference_counts_keep_first_seen_order() {
        let index = SymbolIndex::from_files(&sample());
        assert_eq!(index.reference_counts("foo"), vec![("b.py", 2), ("c.py", 1)]);
        assert!(index.reference_counts("missing").is_empty());
    }

    #[test]
    fn test_reference_counts_across_many_files() {
        let files: Vec<FileTags> = (0..5_000)
            .map(|i| {
                let name = format!("f{i:04}.py");
                let refs = (0..=(i % 3)).map(|line| reference(&name, line, "get")).collect();
                FileTags::new(name.as_str(), format!("/r/{name}"), refs)
            })
            .collect();
        let index = SymbolIndex::from_files(&files);

        let counts = index.reference_counts("get");
        assert_eq!(counts.len(), 5_000);
        assert_eq!(counts[0], ("f0000.py", 1));
        assert_eq!(counts[4_999], ("f4999.py", 2));
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 10_000 - 1);
    }

    #[test]
    fn test_definitions_are_deduplicated() {
        let index = SymbolIndex::from_files(&sample());
        assert_eq!(index.definitions_of("a.py", "bar").map(|s| s.len()), Some(1));
        assert!(index.definitions_of("b.py", "foo").is_none());
        assert_eq!(index.definition_sets().count(), 2);
    }
}
