//! # fb2pack
//!
//! The last steps of turning a converted ebook into files on disk: naming them
//! and packaging them.
//!
//! ## Features
//!
//! - Keyword templates with conditional blocks for author, title and file
//!   name patterns
//! - Keyword-map builders for the usual book metadata
//! - EPUB finalizing: pack a staging directory into a correctly ordered container
//!
//! ## Quick Start
//!
//! ```no_run
//! use fb2pack::template::{BookInfo, expand, file_name_keywords};
//! use fb2pack::finalize_epub;
//!
//! let book = BookInfo::new("Roadside Picnic")
//!     .with_series("Noon Universe", 7)
//!     .with_authors("Arkady & Boris Strugatsky", "Arkady Strugatsky");
//! let keywords = file_name_keywords(&book, 2);
//! let name = expand("#author - #title{ (#series #padnumber)}", &keywords);
//!
//! finalize_epub("/tmp/staging", format!("out/{name}.epub"), false)?;
//! # Ok::<(), fb2pack::Error>(())
//! ```

pub mod epub;
mod error;
pub mod template;
pub mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use epub::{EpubFinalizer, FinalizeConfig, FinalizeReport, finalize_epub};
pub use error::{Error, Phase, Result};
pub use template::{Keywords, expand};
