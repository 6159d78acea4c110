//! Case-insensitive search used by the list screens.

/// Entities that can be matched against a free-text search term.
pub trait Searchable {
    /// Text fields the term is matched against.
    fn search_fields(&self) -> Vec<String>;

    /// An empty term matches everything.
    fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Keep the entries matching `term`, preserving order.
pub fn filter_by_term<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(term)).collect()
}
