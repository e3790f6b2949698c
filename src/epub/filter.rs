//! Pure predicates deciding which staging files travel into the archive.

use std::path::{Component, Path};

/// What to do with one entry found while walking the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Add the file under this archive path.
    Include(String),
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Directories, symlinks and other non-regular entries.
    NotRegular,
    /// The archive being written.
    SelfOutput,
    /// The anchor, which is written separately before the walk.
    Anchor,
    /// Container bookkeeping directly under the staging root.
    RootLevel,
    /// Not below the staging root at all.
    OutsideRoot,
}

/// Check whether an archive-relative path names the anchor entry.
pub fn is_anchor_path(relative: &str, anchor: &str) -> bool {
    relative == anchor
}

/// Check whether `candidate` is the output archive itself.
///
/// Both paths should be in the same form (typically canonical).
pub fn is_self_path(candidate: &Path, output: Option<&Path>) -> bool {
    output.is_some_and(|output| candidate == output)
}

/// Check whether `path` sits directly inside `root`.
pub fn is_root_level(path: &Path, root: &Path) -> bool {
    path.parent() == Some(root)
}

/// Convert a path relative to the staging root into an archive entry name.
///
/// Components are joined with forward slashes whatever the platform
/// separator; `.` and `..` components are dropped.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use fb2pack::epub::archive_path;
///
/// let rel = Path::new("OEBPS").join("text").join("0001.xhtml");
/// assert_eq!(archive_path(&rel), "OEBPS/text/0001.xhtml");
/// ```
pub fn archive_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Decide the fate of a walked entry.
///
/// `output` is the archive being written (if it may live under `root`) and
/// `anchor` the name of the entry that was already written first.
pub fn classify(
    path: &Path,
    is_file: bool,
    root: &Path,
    output: Option<&Path>,
    anchor: &str,
) -> Disposition {
    if !is_file {
        return Disposition::Skip(SkipReason::NotRegular);
    }
    if is_self_path(path, output) {
        return Disposition::Skip(SkipReason::SelfOutput);
    }
    let Ok(relative) = path.strip_prefix(root) else {
        return Disposition::Skip(SkipReason::OutsideRoot);
    };
    let name = archive_path(relative);
    if is_anchor_path(&name, anchor) {
        return Disposition::Skip(SkipReason::Anchor);
    }
    if is_root_level(path, root) {
        return Disposition::Skip(SkipReason::RootLevel);
    }
    Disposition::Include(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn root() -> PathBuf {
        PathBuf::from("/tmp/stage")
    }

    #[test]
    fn test_is_anchor_path() {
        assert!(is_anchor_path("mimetype", "mimetype"));
        assert!(!is_anchor_path("OEBPS/mimetype", "mimetype"));
    }

    #[test]
    fn test_is_self_path() {
        let out = root().join("book.epub");
        assert!(is_self_path(&out, Some(&out)));
        assert!(!is_self_path(&root().join("other.epub"), Some(&out)));
        assert!(!is_self_path(&out, None));
    }

    #[test]
    fn test_is_root_level() {
        assert!(is_root_level(&root().join("mimetype"), &root()));
        assert!(!is_root_level(&root().join("OEBPS").join("a.css"), &root()));
        assert!(!is_root_level(&root(), &root()));
    }

    #[test]
    fn test_archive_path_drops_dot_components() {
        assert_eq!(archive_path(Path::new("./META-INF/container.xml")), "META-INF/container.xml");
        assert_eq!(archive_path(Path::new("")), "");
    }

    #[test]
    fn test_classify_content_file() {
        let path = root().join("OEBPS").join("images").join("cover.jpg");
        assert_eq!(
            classify(&path, true, &root(), None, "mimetype"),
            Disposition::Include("OEBPS/images/cover.jpg".into())
        );
    }

    #[test]
    fn test_classify_skips() {
        let r = root();
        let dir = r.join("OEBPS");
        assert_eq!(
            classify(&dir, false, &r, None, "mimetype"),
            Disposition::Skip(SkipReason::NotRegular)
        );

        let out = r.join("OEBPS").join("book.epub");
        assert_eq!(
            classify(&out, true, &r, Some(&out), "mimetype"),
            Disposition::Skip(SkipReason::SelfOutput)
        );

        assert_eq!(
            classify(&r.join("mimetype"), true, &r, None, "mimetype"),
            Disposition::Skip(SkipReason::Anchor)
        );

        assert_eq!(
            classify(&r.join("notes.txt"), true, &r, None, "mimetype"),
            Disposition::Skip(SkipReason::RootLevel)
        );

        assert_eq!(
            classify(Path::new("/elsewhere/a.xhtml"), true, &r, None, "mimetype"),
            Disposition::Skip(SkipReason::OutsideRoot)
        );
    }
}
