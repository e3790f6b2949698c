//! EPUB container finalizing.
//!
//! Conversion writes the book as loose files into a staging directory. This
//! module packs that directory into the final archive, with the `mimetype`
//! entry first and uncompressed as the container format requires.

mod filter;
mod finalize;

pub use filter::{
    Disposition, SkipReason, archive_path, classify, is_anchor_path, is_root_level, is_self_path,
};
pub use finalize::{
    EpubFinalizer, FinalizeConfig, FinalizeReport, MIMETYPE, finalize_epub, pack_staging_dir,
};
