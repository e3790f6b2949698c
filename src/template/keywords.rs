//! Keyword maps for author, title and output file name templates.

use crate::util::{abbreviate, initial, pad_number};

use super::Keywords;

/// Parts of an author's name as found in the source document.
///
/// `None` means the part is absent; `Some("")` means it is present but blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorName {
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
}

impl AuthorName {
    /// Create a name with first and last parts only.
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: Some(first.into()),
            middle: None,
            last: Some(last.into()),
        }
    }

    /// Set the middle name.
    pub fn with_middle(mut self, middle: impl Into<String>) -> Self {
        self.middle = Some(middle.into());
        self
    }
}

/// Book metadata used to name and title the converted output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookInfo {
    pub title: String,
    pub series: String,
    /// Position within the series; 0 means unnumbered.
    pub sequence: u32,
    pub date: String,
    /// Every author, formatted for display.
    pub authors: String,
    /// Short author form (usually the first author only).
    pub author: String,
    pub id: String,
}

impl BookInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_series(mut self, series: impl Into<String>, sequence: u32) -> Self {
        self.series = series.into();
        self.sequence = sequence;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_authors(mut self, authors: impl Into<String>, author: impl Into<String>) -> Self {
        self.authors = authors.into();
        self.author = author.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Keywords for an author name template.
///
/// Provides `#f`, `#fi`, `#m`, `#mi` and `#l` for the parts that are present.
/// Parts are trimmed; initials are the first character followed by a period.
///
/// # Examples
///
/// ```
/// use fb2pack::template::{AuthorName, author_keywords, expand};
///
/// let name = AuthorName::new("Arthur", "Clarke").with_middle("Charles");
/// let keywords = author_keywords(&name);
/// assert_eq!(expand("#l, #fi{ #mi}", &keywords), "Clarke, A. C.");
/// ```
pub fn author_keywords(name: &AuthorName) -> Keywords {
    let mut keywords = Keywords::new();

    if let Some(first) = &name.first {
        let first = first.trim();
        keywords.insert("#f".into(), first.to_string());
        keywords.insert("#fi".into(), initial(first));
    }
    if let Some(middle) = &name.middle {
        let middle = middle.trim();
        keywords.insert("#m".into(), middle.to_string());
        keywords.insert("#mi".into(), initial(middle));
    }
    if let Some(last) = &name.last {
        keywords.insert("#l".into(), last.trim().to_string());
    }

    keywords
}

/// Keywords for a book title template.
///
/// `pad_width` is the minimum number of digits in `#padnumber`.
pub fn title_keywords(book: &BookInfo, pad_width: usize) -> Keywords {
    let mut keywords = Keywords::new();
    keywords.insert("#title".into(), book.title.clone());
    insert_series(&mut keywords, book, pad_width);
    keywords.insert("#date".into(), book.date.clone());
    keywords
}

/// Keywords for an output file name template.
pub fn file_name_keywords(book: &BookInfo, pad_width: usize) -> Keywords {
    let mut keywords = Keywords::new();
    keywords.insert("#title".into(), book.title.clone());
    insert_series(&mut keywords, book, pad_width);
    keywords.insert("#authors".into(), book.authors.clone());
    keywords.insert("#author".into(), book.author.clone());
    keywords.insert("#bookid".into(), book.id.clone());
    keywords
}

fn insert_series(keywords: &mut Keywords, book: &BookInfo, pad_width: usize) {
    keywords.insert("#series".into(), book.series.clone());
    keywords.insert("#abbrseries".into(), abbreviate(&book.series));

    let (number, padded) = if book.sequence > 0 {
        (book.sequence.to_string(), pad_number(book.sequence, pad_width))
    } else {
        (String::new(), String::new())
    };
    keywords.insert("#number".into(), number);
    keywords.insert("#padnumber".into(), padded);
}
