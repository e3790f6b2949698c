//! Error types for fb2pack operations.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Stage of archive finalizing an I/O failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Writing the uncompressed anchor entry.
    Anchor,
    /// Walking the staging tree and copying content entries.
    Content,
    /// Writing the central directory and closing the output.
    Close,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Anchor => "anchor",
            Phase::Content => "content",
            Phase::Close => "close",
        })
    }
}

/// Errors that can occur while finalizing an archive.
///
/// Template expansion is total and never produces one of these.
#[derive(Error, Debug)]
pub enum Error {
    #[error("output file already exists: {}", .0.display())]
    OutputAlreadyExists(PathBuf),

    #[error("unable to remove existing output {}: {source}", path.display())]
    OutputRemoveFailed { path: PathBuf, source: io::Error },

    #[error("unable to create output directory {}: {source}", path.display())]
    DirectoryCreateFailed { path: PathBuf, source: io::Error },

    #[error("unable to create EPUB {}: {source}", path.display())]
    OutputCreateFailed { path: PathBuf, source: io::Error },

    #[error("required entry '{name}' missing from {}", path.display())]
    RequiredEntryMissing { name: String, path: PathBuf },

    #[error("unable to read {} ({phase}): {source}", path.display())]
    MemberReadFailed {
        path: PathBuf,
        phase: Phase,
        source: io::Error,
    },

    #[error("unable to add '{entry}' to EPUB ({phase}): {source}")]
    MemberWriteFailed {
        entry: String,
        phase: Phase,
        source: io::Error,
    },

    #[error("unable to finish EPUB: {source}")]
    ArchiveCloseFailed { source: io::Error },
}

impl Error {
    /// Phase of the archive pipeline the error was raised in, if it came from
    /// reading or writing an entry.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Error::MemberReadFailed { phase, .. } | Error::MemberWriteFailed { phase, .. } => {
                Some(*phase)
            }
            Error::ArchiveCloseFailed { .. } => Some(Phase::Close),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_context() {
        let err = Error::MemberWriteFailed {
            entry: "OEBPS/content.opf".into(),
            phase: Phase::Content,
            source: io::Error::other("disk full"),
        };
        assert_eq!(err.phase(), Some(Phase::Content));
        assert_eq!(
            err.to_string(),
            "unable to add 'OEBPS/content.opf' to EPUB (content): disk full"
        );

        let err = Error::ArchiveCloseFailed {
            source: io::Error::other("short write"),
        };
        assert_eq!(err.phase(), Some(Phase::Close));
        assert_eq!(Error::OutputAlreadyExists(PathBuf::from("a.epub")).phase(), None);
    }

    #[test]
    fn test_missing_entry_message() {
        let err = Error::RequiredEntryMissing {
            name: "mimetype".into(),
            path: PathBuf::from("stage"),
        };
        assert_eq!(err.to_string(), "required entry 'mimetype' missing from stage");
    }
}
