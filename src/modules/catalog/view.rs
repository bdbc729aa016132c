//! Pure catalog view computation: search, filter, sort, paginate.

use serde::Serialize;

use super::models::{Book, QueryState, SortKey};

/// One displayable page of the catalog plus the page count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage {
    pub page_items: Vec<Book>,
    pub total_pages: usize,
}

/// Derive the displayable page for `state` from a catalog snapshot.
///
/// The pipeline is fixed: case-insensitive title search, closed-field
/// substring filter, stable sort by the selected key, then pagination.
/// The input catalog is never mutated and the same inputs always yield the
/// same outputs. An empty result still reports one (empty) page, and a page
/// past the end yields an empty slice rather than an error.
pub fn compute_view(catalog: &[Book], state: &QueryState) -> CatalogPage {
    let needle = state.search_text.to_lowercase();
    let filter_value = state.filter_value.to_lowercase();
    let accessor = state.filter_field.accessor();

    let mut result: Vec<&Book> = catalog
        .iter()
        .filter(|book| book.title.to_lowercase().contains(&needle))
        .filter(|book| match accessor {
            None => true,
            Some(field_text) => field_text(book).to_lowercase().contains(&filter_value),
        })
        .collect();

    match state.sort_key {
        SortKey::Title => result.sort_by_key(|book| book.title.to_lowercase()),
        SortKey::Author => result.sort_by_key(|book| book.author.to_lowercase()),
    }

    let total_pages = result.len().div_ceil(state.page_size).max(1);

    let start = state
        .page
        .saturating_sub(1)
        .saturating_mul(state.page_size)
        .min(result.len());
    let end = start.saturating_add(state.page_size).min(result.len());
    let page_items = result[start..end].iter().map(|book| (*book).clone()).collect();

    CatalogPage {
        page_items,
        total_pages,
    }
}
