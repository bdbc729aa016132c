//! Ordered, id-keyed store backing the personal shelf.

use thiserror::Error;

use crate::modules::catalog::models::{Book, BookFields};

/// Domain errors for shelf mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShelfError {
    /// A record with this id is already shelved.
    #[error("book {0} is already on the shelf")]
    AlreadyExists(u64),
    /// No shelved record carries this id.
    #[error("book {0} is not on the shelf")]
    NotFound(u64),
}

/// User-curated, ordered collection of books keyed by id.
///
/// Insertion order is preserved. Edits replace an entry in place and never
/// move it, so the shelf keeps its own ordering independently of however
/// the catalog is filtered or sorted. No two entries share an id.
#[derive(Debug, Default)]
pub struct Shelf {
    books: Vec<Book>,
}

impl Shelf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a book to the end of the shelf, rejecting ids already present.
    pub fn add(&mut self, book: Book) -> Result<(), ShelfError> {
        if self.books.iter().any(|existing| existing.id == book.id) {
            return Err(ShelfError::AlreadyExists(book.id));
        }
        self.books.push(book);
        Ok(())
    }

    /// Replace the entry with `id` at its existing position. The id itself
    /// never changes.
    pub fn edit(&mut self, id: u64, fields: BookFields) -> Result<(), ShelfError> {
        let slot = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(ShelfError::NotFound(id))?;
        *slot = Book::from_fields(id, fields);
        Ok(())
    }

    /// Remove the entry with `id`. Absent ids are a no-op, not an error.
    pub fn delete(&mut self, id: u64) {
        self.books.retain(|book| book.id != id);
    }

    /// Snapshot of the current contents in current order.
    pub fn list(&self) -> Vec<Book> {
        self.books.clone()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::provider::seed_books;

    fn sample(id_index: usize) -> Book {
        seed_books()[id_index].clone()
    }

    #[test]
    fn adding_the_same_id_twice_is_rejected() {
        let mut shelf = Shelf::new();

        shelf.add(sample(0)).unwrap();
        let err = shelf.add(sample(0)).unwrap_err();

        assert_eq!(err, ShelfError::AlreadyExists(1));
        assert_eq!(shelf.len(), 1);
    }

    #[test]
    fn dedup_is_by_id_not_by_content() {
        let mut shelf = Shelf::new();

        let mut altered = sample(0);
        shelf.add(sample(0)).unwrap();
        altered.title = "A different title".to_string();

        assert_eq!(shelf.add(altered).unwrap_err(), ShelfError::AlreadyExists(1));
    }

    #[test]
    fn edit_replaces_in_place_and_keeps_the_id() {
        let mut shelf = Shelf::new();
        shelf.add(sample(0)).unwrap();
        shelf.add(sample(1)).unwrap();

        let fields = BookFields {
            title: "New Title".to_string(),
            author: "F. Scott Fitzgerald".to_string(),
            description: "A novel set in the Roaring Twenties.".to_string(),
            country: "USA".to_string(),
            language: "English".to_string(),
            year: 1925,
        };
        shelf.edit(1, fields).unwrap();

        let books = shelf.list();
        assert_eq!(books[0].title, "New Title");
        assert_eq!(books[0].id, 1);
        assert_eq!(books[1].title, "1984");
    }

    #[test]
    fn editing_a_missing_id_fails() {
        let mut shelf = Shelf::new();

        let fields = BookFields {
            title: "Ghost".to_string(),
            author: String::new(),
            description: String::new(),
            country: String::new(),
            language: String::new(),
            year: 0,
        };

        assert_eq!(shelf.edit(42, fields).unwrap_err(), ShelfError::NotFound(42));
    }

    #[test]
    fn delete_removes_exactly_one_entry_and_repeats_are_noops() {
        let mut shelf = Shelf::new();
        shelf.add(sample(0)).unwrap();
        shelf.add(sample(1)).unwrap();

        shelf.delete(1);
        assert_eq!(shelf.len(), 1);

        shelf.delete(1);
        assert_eq!(shelf.len(), 1);
        assert_eq!(shelf.list()[0].id, 2);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut shelf = Shelf::new();
        shelf.add(sample(4)).unwrap();
        shelf.add(sample(0)).unwrap();
        shelf.add(sample(2)).unwrap();

        let ids: Vec<u64> = shelf.list().iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![5, 1, 3]);
    }
}
