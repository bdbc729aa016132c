use serde::{Deserialize, Serialize};

/// Default number of books shown per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// A single catalog record.
///
/// Records are created by the catalog provider and treated as read-only by
/// the view pipeline. Identity for dedup purposes is `id` alone, never the
/// full field content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier within a catalog snapshot
    pub id: u64,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Short description of the book
    pub description: String,
    /// Country of origin
    pub country: String,
    /// Original publication language
    pub language: String,
    /// Publication year; negative values denote BCE
    pub year: i32,
}

impl Book {
    /// Rebuild a record from an id and a full field set.
    pub fn from_fields(id: u64, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            description: fields.description,
            country: fields.country,
            language: fields.language,
            year: fields.year,
        }
    }
}

/// Request model carrying every book field except the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookFields {
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Short description of the book
    pub description: String,
    /// Country of origin
    pub country: String,
    /// Original publication language
    pub language: String,
    /// Publication year; negative values denote BCE
    pub year: i32,
}

/// Field a catalog filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    #[default]
    All,
    Title,
    Author,
    Country,
    Language,
    Year,
}

impl FilterField {
    /// Resolve the closed field-to-text mapping for this filter.
    ///
    /// `All` has no accessor and matches every record. `Year` filters over
    /// its decimal string form; filtering is always textual regardless of
    /// the underlying field type.
    pub fn accessor(self) -> Option<fn(&Book) -> String> {
        match self {
            FilterField::All => None,
            FilterField::Title => Some(|book| book.title.clone()),
            FilterField::Author => Some(|book| book.author.clone()),
            FilterField::Country => Some(|book| book.country.clone()),
            FilterField::Language => Some(|book| book.language.clone()),
            FilterField::Year => Some(|book| book.year.to_string()),
        }
    }
}

/// Sort key for the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Author,
}

/// Query parameters driving a single catalog view computation.
///
/// The page is 1-indexed. Mutating any search, filter, or sort input through
/// the setters resets the page to 1, so a view never lands beyond the new
/// result set.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub search_text: String,
    pub filter_field: FilterField,
    pub filter_value: String,
    pub sort_key: SortKey,
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            filter_field: FilterField::All,
            filter_value: String::new(),
            sort_key: SortKey::Title,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    /// Default query state over a custom page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    pub fn set_filter_field(&mut self, field: FilterField) {
        self.filter_field = field;
        self.page = 1;
    }

    pub fn set_filter_value(&mut self, value: impl Into<String>) {
        self.filter_value = value.into();
        self.page = 1;
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.page = 1;
    }

    /// Advance one page while more pages remain; out of range is a no-op.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// Retreat one page while not on the first; out of range is a no-op.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }
}
