//! Catalog provider boundary and the built-in seed catalog.

use async_trait::async_trait;

use super::models::Book;

/// Source of catalog snapshots.
///
/// Implementations may serve a static seed or a remote source; the browse
/// path only requires that every record conforms to the catalog data model.
/// The optional search term lets a provider narrow the snapshot by title
/// before it is handed to the view pipeline.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch(&self, search: Option<&str>) -> anyhow::Result<Vec<Book>>;
}

/// In-process provider serving the built-in seed set.
pub struct SeedCatalog;

impl SeedCatalog {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SeedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for SeedCatalog {
    async fn fetch(&self, search: Option<&str>) -> anyhow::Result<Vec<Book>> {
        let mut books = seed_books();
        if let Some(term) = search {
            let needle = term.to_lowercase();
            books.retain(|book| book.title.to_lowercase().contains(&needle));
        }
        Ok(books)
    }
}

/// The ten-record seed catalog.
pub fn seed_books() -> Vec<Book> {
    fn book(
        id: u64,
        title: &str,
        author: &str,
        description: &str,
        country: &str,
        language: &str,
        year: i32,
    ) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            country: country.to_string(),
            language: language.to_string(),
            year,
        }
    }

    vec![
        book(
            1,
            "The Great Gatsby",
            "F. Scott Fitzgerald",
            "A novel set in the Roaring Twenties.",
            "USA",
            "English",
            1925,
        ),
        book(
            2,
            "1984",
            "George Orwell",
            "A dystopian novel about government surveillance and control.",
            "UK",
            "English",
            1949,
        ),
        book(
            3,
            "To Kill a Mockingbird",
            "Harper Lee",
            "A novel about racial injustice in the American South.",
            "USA",
            "English",
            1960,
        ),
        book(
            4,
            "Pride and Prejudice",
            "Jane Austen",
            "A romantic novel set in 19th century England.",
            "UK",
            "English",
            1813,
        ),
        book(
            5,
            "The Catcher in the Rye",
            "J.D. Salinger",
            "A novel about a teenager's journey of self-discovery.",
            "USA",
            "English",
            1951,
        ),
        book(
            6,
            "The Hobbit",
            "J.R.R. Tolkien",
            "A fantasy novel about a hobbit's adventure.",
            "UK",
            "English",
            1937,
        ),
        book(
            7,
            "Moby Dick",
            "Herman Melville",
            "A novel about a whaling voyage.",
            "USA",
            "English",
            1851,
        ),
        book(
            8,
            "War and Peace",
            "Leo Tolstoy",
            "A novel about the French invasion of Russia.",
            "Russia",
            "Russian",
            1869,
        ),
        book(
            9,
            "The Odyssey",
            "Homer",
            "An epic poem about a hero's journey.",
            "Greece",
            "Greek",
            -800,
        ),
        book(
            10,
            "The Brothers Karamazov",
            "Fyodor Dostoevsky",
            "A novel about a family's moral conflicts.",
            "Russia",
            "Russian",
            1880,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn seed_holds_ten_books_with_unique_ids() {
        let books = seed_books();
        assert_eq!(books.len(), 10);

        let ids: HashSet<u64> = books.iter().map(|book| book.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[tokio::test]
    async fn fetch_narrows_by_title_case_insensitively() {
        let provider = SeedCatalog::new();

        let all = provider.fetch(None).await.unwrap();
        assert_eq!(all.len(), 10);

        let narrowed = provider.fetch(Some("the")).await.unwrap();
        assert!(narrowed.iter().all(|book| book.title.to_lowercase().contains("the")));
        assert!(!narrowed.is_empty());
    }
}
