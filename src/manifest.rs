use indexmap::IndexMap;
use miette::Diagnostic;
use std::{
    fmt,
    path::{Component, Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

/// Why a manifest path was rejected.
#[derive(Debug, Error, Diagnostic, Clone, Copy, PartialEq, Eq)]
pub enum PathViolation {
    #[error("the path is empty")]
    Empty,
    #[error("the path is absolute")]
    Absolute,
    #[error("the path contains a '..' segment")]
    ParentTraversal,
    #[error("the path uses '\\' as a separator")]
    Backslash,
    #[error("the path ends with '/' and does not name a file")]
    TrailingSeparator,
    #[error("the path contains a NUL byte")]
    NulByte,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("invalid manifest path '{path}': {violation}")]
    #[diagnostic(
        code(sprout::manifest::invalid_path),
        help("Manifest paths are relative, '/'-separated, and must stay inside the base directory")
    )]
    InvalidPath {
        path: String,
        violation: PathViolation,
    },
}

/// A validated, normalized, relative path of a manifest entry.
///
/// Empty and `.` segments are dropped during parsing, so `./cfg//env.yml` and
/// `cfg/env.yml` are the same path. A `ManifestPath` can never be absolute and
/// never contains a `..` segment, which means [`ManifestPath::resolve`] always
/// lands inside the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManifestPath(String);
impl ManifestPath {
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let invalid = |violation| ManifestError::InvalidPath {
            path: raw.to_string(),
            violation,
        };

        if raw.contains('\0') {
            return Err(invalid(PathViolation::NulByte));
        }

        if is_absolute(raw) {
            return Err(invalid(PathViolation::Absolute));
        }

        let mut segments: Vec<&str> = Vec::new();

        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => return Err(invalid(PathViolation::ParentTraversal)),
                other => segments.push(other),
            }
        }

        if raw.contains('\\') {
            return Err(invalid(PathViolation::Backslash));
        }

        if segments.is_empty() {
            return Err(invalid(PathViolation::Empty));
        }

        if raw.ends_with('/') {
            return Err(invalid(PathViolation::TrailingSeparator));
        }

        Ok(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Joins every segment onto `base` using the host separator.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        let mut resolved = base.to_path_buf();

        for segment in self.segments() {
            resolved.push(segment);
        }

        resolved
    }
}
impl fmt::Display for ManifestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl AsRef<str> for ManifestPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl FromStr for ManifestPath {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_absolute(raw: &str) -> bool {
    if raw.starts_with('/') || raw.starts_with('\\') {
        return true;
    }

    let path = Path::new(raw);

    path.is_absolute()
        || path.has_root()
        || matches!(path.components().next(), Some(Component::Prefix(_)))
}

/// A single borrowed `(path, content)` pair of a [`Manifest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry<'a> {
    pub path: &'a ManifestPath,
    pub content: &'a str,
}

/// The declared file tree: an ordered, immutable set of relative paths and
/// the exact content each file should hold.
///
/// Iteration follows insertion order. Hierarchy is implicit in the `/`
/// separators of each path, there are no directory entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: IndexMap<ManifestPath, String>,
}
impl Manifest {
    /// Validates every path of `table` and builds a manifest from it.
    ///
    /// A path that appears more than once (after normalization) keeps the
    /// position of its first occurrence and the content of its last one.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidPath`] for the first path that is empty,
    /// absolute, escapes through `..`, or is otherwise malformed. Nothing is
    /// returned for the valid entries in that case.
    pub fn new<I, P, C>(table: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let mut entries: IndexMap<ManifestPath, String> = IndexMap::new();

        for (raw_path, content) in table {
            let path = ManifestPath::parse(raw_path.as_ref())?;

            if let Some(previous) = entries.insert(path, content.into()) {
                log::warn!(
                    "duplicate manifest path '{}', replacing {} bytes with the later entry",
                    raw_path.as_ref(),
                    previous.len()
                );
            }
        }

        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ManifestEntry<'_>> {
        self.entries.iter().map(|(path, content)| ManifestEntry {
            path,
            content: content.as_str(),
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &ManifestPath> {
        self.entries.keys()
    }

    /// Looks up the content declared for `path`, which is normalized first.
    pub fn get(&self, path: &str) -> Option<&str> {
        let path = ManifestPath::parse(path).ok()?;

        self.entries.get(&path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }
}
impl<'a> IntoIterator for &'a Manifest {
    type Item = ManifestEntry<'a>;
    type IntoIter = Box<dyn Iterator<Item = ManifestEntry<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation_of(raw: &str) -> PathViolation {
        match ManifestPath::parse(raw) {
            Err(ManifestError::InvalidPath { violation, .. }) => violation,
            Ok(path) => panic!("expected '{raw}' to be rejected, got '{path}'"),
        }
    }

    #[test]
    fn test_parse_keeps_plain_relative_paths() {
        let path = ManifestPath::parse("tests/api/definitions/login.yml").unwrap();

        assert_eq!(path.as_str(), "tests/api/definitions/login.yml");
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec!["tests", "api", "definitions", "login.yml"]
        );
    }

    #[test]
    fn test_parse_normalizes_current_dir_and_empty_segments() {
        let path = ManifestPath::parse("./cfg//sub/./.keep").unwrap();

        assert_eq!(path.as_str(), "cfg/sub/.keep");
    }

    #[test]
    fn test_parse_accepts_dotfiles_and_dotted_names() {
        assert!(ManifestPath::parse(".env.development").is_ok());
        assert!(ManifestPath::parse("..hidden").is_ok());
        assert!(ManifestPath::parse("a/...").is_ok());
    }

    #[test]
    fn test_parse_rejects_traversal() {
        assert_eq!(violation_of("../escape.txt"), PathViolation::ParentTraversal);
        assert_eq!(violation_of("a/../../b"), PathViolation::ParentTraversal);
        assert_eq!(violation_of("a/.."), PathViolation::ParentTraversal);
    }

    #[test]
    fn test_parse_rejects_absolute_paths() {
        assert_eq!(violation_of("/etc/passwd"), PathViolation::Absolute);
        assert_eq!(violation_of("\\\\server\\share"), PathViolation::Absolute);
    }

    #[test]
    fn test_parse_rejects_malformed_paths() {
        assert_eq!(violation_of(""), PathViolation::Empty);
        assert_eq!(violation_of("."), PathViolation::Empty);
        assert_eq!(violation_of("./"), PathViolation::Empty);
        assert_eq!(violation_of("dist/"), PathViolation::TrailingSeparator);
        assert_eq!(violation_of("src\\core\\a.ts"), PathViolation::Backslash);
        assert_eq!(violation_of("a\0b"), PathViolation::NulByte);
    }

    #[test]
    fn test_resolve_joins_under_base() {
        let path = ManifestPath::parse("cfg/sub/.keep").unwrap();
        let resolved = path.resolve(Path::new("out"));

        assert_eq!(resolved, Path::new("out").join("cfg").join("sub").join(".keep"));
        assert!(resolved.starts_with("out"));
    }

    #[test]
    fn test_manifest_preserves_insertion_order() {
        let manifest = Manifest::new([
            ("z.txt", "z"),
            ("a/b.txt", "b"),
            ("m/.keep", ""),
        ])
        .unwrap();

        let paths: Vec<&str> = manifest.paths().map(ManifestPath::as_str).collect();

        assert_eq!(paths, vec!["z.txt", "a/b.txt", "m/.keep"]);
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn test_manifest_rejects_whole_table_on_one_bad_path() {
        let result = Manifest::new([("ok.txt", "fine"), ("../escape.txt", "nope")]);

        assert!(matches!(
            result,
            Err(ManifestError::InvalidPath {
                violation: PathViolation::ParentTraversal,
                ..
            })
        ));
    }

    #[test]
    fn test_manifest_duplicates_last_entry_wins() {
        let manifest = Manifest::new([
            ("cfg/env.yml", "first"),
            ("other.txt", ""),
            ("./cfg/env.yml", "second"),
        ])
        .unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get("cfg/env.yml"), Some("second"));
        assert_eq!(
            manifest.iter().next().map(|entry| entry.path.as_str()),
            Some("cfg/env.yml")
        );
    }

    #[test]
    fn test_manifest_keeps_empty_content() {
        let manifest = Manifest::new([("dist/.gitkeep", String::new())]).unwrap();

        assert!(manifest.contains("dist/.gitkeep"));
        assert_eq!(manifest.get("dist/.gitkeep"), Some(""));
        assert!(!manifest.contains("dist/missing"));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::empty();

        assert!(manifest.is_empty());
        assert_eq!((&manifest).into_iter().count(), 0);
    }
}
