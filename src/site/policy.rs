//! Path resolution under the document root.
//!
//! A request path is resolved lexically first: `.` segments are dropped and
//! `..` segments pop the previous one, and popping past the root denies the
//! request outright. Containment is decided on path components, never on
//! string prefixes, so `/srv/www2` is not inside `/srv/www`. Restricted
//! folder entries go through the same normalization, so `./private`,
//! `private/` and `a/../private` all name `private`.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Absolute location under the root that may be served if it exists
    Allowed(PathBuf),
    /// Escapes the root or lies in a restricted folder
    Forbidden,
}

/// The document root together with the folders that must never be served.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    root: PathBuf,
    restricted: Vec<PathBuf>,
    index: String,
}

impl AccessPolicy {
    /// Creates a policy, canonicalizing `root` on the way.
    pub fn new<S: AsRef<str>>(
        root: impl AsRef<Path>,
        restricted_folders: &[S],
        index: impl Into<String>,
    ) -> io::Result<Self> {
        let root = std::fs::canonicalize(root)?;
        Ok(Self::from_canonical_root(root, restricted_folders, index))
    }

    /// Creates a policy around a root that is already absolute and
    /// canonical.
    pub fn from_canonical_root<S: AsRef<str>>(
        root: PathBuf,
        restricted_folders: &[S],
        index: impl Into<String>,
    ) -> Self {
        let restricted = restricted_folders
            .iter()
            .filter_map(|folder| {
                let folder = folder.as_ref();
                match normalize(folder) {
                    Some(relative) if !relative.as_os_str().is_empty() => Some(relative),
                    _ => {
                        warn!(folder, "Ignoring restricted folder outside the document root");
                        None
                    }
                }
            })
            .collect();

        Self {
            root,
            restricted,
            index: index.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a page that lives directly in the root, such as the
    /// not-found page.
    pub fn page(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Resolves a request path (query already stripped) to a location under
    /// the root. `/` and the empty path map to the index document.
    pub fn resolve(&self, request_path: &str) -> Access {
        let Some(mut relative) = normalize(request_path) else {
            return Access::Forbidden;
        };

        if relative.as_os_str().is_empty() {
            relative = PathBuf::from(&self.index);
        }

        // a segment must stay a single plain component
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Access::Forbidden;
        }

        if self.is_restricted(&relative) {
            return Access::Forbidden;
        }

        Access::Allowed(self.root.join(relative))
    }

    /// Re-checks a canonicalized location, catching symlinks that lead out
    /// of the root or into a restricted folder.
    pub fn permits(&self, canonical: &Path) -> bool {
        match canonical.strip_prefix(&self.root) {
            Ok(relative) => !self.is_restricted(relative),
            Err(_) => false,
        }
    }

    fn is_restricted(&self, relative: &Path) -> bool {
        self.restricted
            .iter()
            .any(|folder| relative.starts_with(folder))
    }
}

/// Resolves `.` and `..` segments of a `/`-separated path without touching
/// the filesystem. Returns `None` when `..` climbs above the start.
fn normalize(path: &str) -> Option<PathBuf> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(segments.iter().collect())
}
