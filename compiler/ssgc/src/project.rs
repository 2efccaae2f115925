//! Unity project discovery and output naming.

use std::path::{Path, PathBuf};

use crate::CONTROL_FILE;

/// Directory existence check, injectable for tests.
pub trait DirLookup {
    fn is_dir(&self, path: &Path) -> bool;
}

/// Looks up directories on the real filesystem.
#[derive(Copy, Clone, Debug, Default)]
pub struct RealFs;

impl DirLookup for RealFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Longest common directory prefix of `paths`, compared segment by segment
/// with `\` treated as `/`.
pub fn common_prefix<S: AsRef<str>>(paths: &[S]) -> String {
    let Some((first, rest)) = paths.split_first() else {
        return String::new();
    };

    let first = normalize(first.as_ref());
    let mut common: Vec<&str> = first.split('/').collect();
    for path in rest {
        let path = normalize(path.as_ref());
        let shared = common
            .iter()
            .zip(path.split('/'))
            .take_while(|(a, b)| **a == *b)
            .count();
        common.truncate(shared);
    }
    common.join("/")
}

/// Walk up from the common prefix of `paths` to a folder named `Assets`
/// whose parent holds both `Packages` and `ProjectSettings`.
pub fn find_project_root<S: AsRef<str>>(paths: &[S], dirs: &impl DirLookup) -> Option<PathBuf> {
    let prefix = common_prefix(paths);
    let mut segments: Vec<&str> = prefix.split('/').collect();

    while let Some(last) = segments.pop() {
        if last != "Assets" {
            continue;
        }
        let root = PathBuf::from(segments.join("/"));
        let is_project = ["Packages", "ProjectSettings"]
            .iter()
            .all(|sub| dirs.is_dir(&root.join(sub)));
        if is_project {
            tracing::debug!(root = %root.display(), "project root found");
            return Some(root);
        }
    }

    tracing::debug!(%prefix, "no project root above common prefix");
    None
}

/// Output name for a file, given its path relative to `Assets`:
/// `{dir}/{stem}.SaintsSerialized.cs` with every separator replaced by `_`.
pub fn hint_name(relative: &str) -> String {
    let relative = normalize(relative);
    let (dir, file) = match relative.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", relative.as_str()),
    };
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);

    let name = if dir.is_empty() {
        format!("{stem}.SaintsSerialized.cs")
    } else {
        format!("{dir}/{stem}.SaintsSerialized.cs")
    };
    name.replace('/', "_")
}

/// A located Unity project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProjectLayout { root: root.into() }
    }

    /// Locate the project from the paths of its source files.
    pub fn discover<S: AsRef<str>>(paths: &[S], dirs: &impl DirLookup) -> Option<Self> {
        find_project_root(paths, dirs).map(ProjectLayout::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn control_file(&self) -> PathBuf {
        self.root.join(CONTROL_FILE)
    }

    /// Path of `file` relative to `Assets`, or `None` if it lies elsewhere.
    pub fn relative_to_assets(&self, file: &str) -> Option<String> {
        let assets = normalize(&self.root.join("Assets").to_string_lossy());
        let file = normalize(file);
        let rest = file.strip_prefix(assets.as_str())?.strip_prefix('/')?;
        (!rest.is_empty()).then(|| rest.to_owned())
    }

    /// Output name for `file`, or `None` if it is outside `Assets`.
    pub fn output_name(&self, file: &str) -> Option<String> {
        self.relative_to_assets(file).map(|rel| hint_name(&rel))
    }
}
