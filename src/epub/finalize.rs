//! Packing a staging directory into an EPUB container.
//!
//! The anchor entry goes first and uncompressed; every other member follows
//! in sorted walk order, deflated.

use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Phase, Result};

use super::filter::{Disposition, classify};

/// Name of the entry that must open every EPUB container.
pub const MIMETYPE: &str = "mimetype";

const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Configuration for EPUB finalizing.
#[derive(Debug, Clone)]
pub struct FinalizeConfig {
    /// Replace an existing output file instead of failing.
    pub overwrite: bool,
    /// Debug runs always replace existing output.
    pub debug: bool,
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
    /// Root-level file written first and uncompressed.
    pub anchor: String,
}

impl Default for FinalizeConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            debug: false,
            compression_level: None,
            anchor: MIMETYPE.to_string(),
        }
    }
}

/// Entries written to an archive, in archive order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct FinalizeReport {
    /// Entry names as stored in the archive.
    pub entries: Vec<String>,
    /// Total uncompressed bytes.
    pub bytes: u64,
}

/// Packs a prepared staging directory into a single EPUB file.
///
/// # Example
///
/// ```no_run
/// use fb2pack::epub::{EpubFinalizer, FinalizeConfig};
///
/// let config = FinalizeConfig { overwrite: true, ..Default::default() };
/// let report = EpubFinalizer::new()
///     .with_config(config)
///     .finalize("/tmp/staging", "out/book.epub")?;
/// println!("{} entries", report.entries.len());
/// # Ok::<(), fb2pack::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EpubFinalizer {
    config: FinalizeConfig,
}

impl EpubFinalizer {
    /// Create a finalizer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the finalizer with custom settings.
    pub fn with_config(mut self, config: FinalizeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FinalizeConfig {
        &self.config
    }

    /// Write `staging` to the archive at `output`.
    ///
    /// An existing output is only replaced when `overwrite` or `debug` is set.
    /// Missing parent directories are created. A failure after the output was
    /// created leaves the partial file in place.
    pub fn finalize(
        &self,
        staging: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<FinalizeReport> {
        let staging = staging.as_ref();
        let output = output.as_ref();

        let exists = match fs::metadata(output) {
            Ok(_) => true,
            Err(e) if is_absent(&e) => false,
            Err(source) => {
                return Err(Error::OutputCreateFailed {
                    path: output.to_path_buf(),
                    source,
                });
            }
        };
        if exists && !self.config.overwrite && !self.config.debug {
            return Err(Error::OutputAlreadyExists(output.to_path_buf()));
        }

        // Checked before touching the output so a bad staging dir leaves no file.
        locate_anchor(staging, &self.config.anchor)?;

        if exists {
            warn!(file = %output.display(), "overwriting existing file");
            fs::remove_file(output).map_err(|source| Error::OutputRemoveFailed {
                path: output.to_path_buf(),
                source,
            })?;
        } else {
            create_parent_dir(output)?;
        }

        let mut file = File::create(output).map_err(|source| Error::OutputCreateFailed {
            path: output.to_path_buf(),
            source,
        })?;

        let root = fs::canonicalize(staging).map_err(|source| Error::MemberReadFailed {
            path: staging.to_path_buf(),
            phase: Phase::Content,
            source,
        })?;
        let output_canonical =
            fs::canonicalize(output).map_err(|source| Error::OutputCreateFailed {
                path: output.to_path_buf(),
                source,
            })?;

        let report = pack_staging_dir(&root, &mut file, Some(&output_canonical), &self.config)?;
        info!(
            file = %output.display(),
            entries = report.entries.len(),
            bytes = report.bytes,
            "EPUB finalized"
        );
        Ok(report)
    }
}

/// Produce an EPUB at `output` from the files prepared in `staging`.
///
/// The `mimetype` file at the staging root becomes the first, uncompressed
/// entry. Everything below the root's subdirectories follows in sorted
/// depth-first order, deflated. Other root-level files are not packed.
pub fn finalize_epub(
    staging: impl AsRef<Path>,
    output: impl AsRef<Path>,
    overwrite: bool,
) -> Result<()> {
    let config = FinalizeConfig {
        overwrite,
        ..Default::default()
    };
    EpubFinalizer::new()
        .with_config(config)
        .finalize(staging, output)
        .map(|_| ())
}

/// Pack `staging` into any [`Write`] + [`Seek`] destination.
///
/// `exclude` names a file under `staging` that must not be packed, normally
/// the archive being written. It is compared against walked paths as given,
/// so pass both in the same form.
pub fn pack_staging_dir<W: Write + Seek>(
    staging: &Path,
    writer: &mut W,
    exclude: Option<&Path>,
    config: &FinalizeConfig,
) -> Result<FinalizeReport> {
    let anchor = locate_anchor(staging, &config.anchor)?;

    let level = config
        .compression_level
        .unwrap_or(DEFAULT_COMPRESSION_LEVEL);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(level as i64));

    let mut zip = ZipWriter::new(writer);
    let mut report = FinalizeReport::default();

    // 1. Anchor first, stored, under its bare name
    report.bytes += add_member(&mut zip, &anchor, &config.anchor, stored, Phase::Anchor)?;
    report.entries.push(config.anchor.clone());

    // 2. Everything else in walk order
    for entry in WalkDir::new(staging).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(staging).to_path_buf();
            Error::MemberReadFailed {
                path,
                phase: Phase::Content,
                source: io::Error::from(e),
            }
        })?;

        let path = entry.path();
        match classify(
            path,
            entry.file_type().is_file(),
            staging,
            exclude,
            &config.anchor,
        ) {
            Disposition::Include(name) => {
                report.bytes += add_member(&mut zip, path, &name, deflated, Phase::Content)?;
                report.entries.push(name);
            }
            Disposition::Skip(reason) => {
                trace!(path = %path.display(), ?reason, "skipping");
            }
        }
    }

    zip.finish()
        .map_err(|e| Error::ArchiveCloseFailed { source: io_error(e) })?;
    Ok(report)
}

fn locate_anchor(staging: &Path, anchor: &str) -> Result<PathBuf> {
    let path = staging.join(anchor);
    let missing = || Error::RequiredEntryMissing {
        name: anchor.to_string(),
        path: staging.to_path_buf(),
    };
    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => Ok(path),
        Ok(_) => Err(missing()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(missing()),
        Err(source) => Err(Error::MemberReadFailed {
            path,
            phase: Phase::Anchor,
            source,
        }),
    }
}

/// Lookup errors that only mean "nothing there yet". A parent that is not a
/// directory is reported later, when the parent is created.
fn is_absent(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn create_parent_dir(output: &Path) -> Result<()> {
    let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(parent)
        .map_err(|source| Error::DirectoryCreateFailed {
            path: parent.to_path_buf(),
            source,
        })
}

fn add_member<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: &str,
    options: SimpleFileOptions,
    phase: Phase,
) -> Result<u64> {
    let data = fs::read(path).map_err(|source| Error::MemberReadFailed {
        path: path.to_path_buf(),
        phase,
        source,
    })?;

    zip.start_file(name, options)
        .map_err(io_error)
        .and_then(|()| zip.write_all(&data))
        .map_err(|source| Error::MemberWriteFailed {
            entry: name.to_string(),
            phase,
            source,
        })?;

    debug!(entry = name, bytes = data.len(), %phase, "added entry");
    Ok(data.len() as u64)
}

fn io_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> io::Error {
    io::Error::other(e)
}
