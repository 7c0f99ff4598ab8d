//! Read-only queries over a catalog snapshot.
//!
//! All functions are pure and never fail; an empty catalog yields empty
//! results.

use std::cmp::Reverse;

use super::types::SearchOutcome;
use crate::catalog::Book;

/// Exact-title lookup plus the list of titles containing `query`.
///
/// Matching is case-sensitive. An empty query matches every title.
pub fn search(books: &[Book], query: &str) -> SearchOutcome {
    let found = books.iter().any(|b| b.title == query);
    let matches = books
        .iter()
        .filter(|b| b.title.contains(query))
        .cloned()
        .collect();

    SearchOutcome {
        query: query.to_string(),
        found,
        matches,
    }
}

/// All titles, ascending by their lowercased form. Stable.
pub fn sorted_by_title(books: &[Book]) -> Vec<String> {
    let mut titles: Vec<String> = books.iter().map(|b| b.title.clone()).collect();
    titles.sort_by_cached_key(|t| t.to_lowercase());
    titles
}

/// All books, descending by download count. Stable.
pub fn sorted_by_downloads(books: &[Book]) -> Vec<Book> {
    let mut sorted = books.to_vec();
    sorted.sort_by_key(|b| Reverse(b.download_count));
    sorted
}

/// The first book holding the maximum download count.
pub fn most_downloaded(books: &[Book]) -> Option<&Book> {
    // Iterator::max_by_key keeps the last of equal maxima; we want the first.
    books.iter().reduce(|best, b| {
        if b.download_count > best.download_count {
            b
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books(entries: &[(&str, u64)]) -> Vec<Book> {
        entries.iter().map(|(t, d)| Book::new(*t, *d)).collect()
    }

    #[test]
    fn test_search_exact_match_found() {
        let catalog = books(&[("Dune", 10), ("Dune Messiah", 5)]);
        let outcome = search(&catalog, "Dune");
        assert!(outcome.found);
        assert_eq!(outcome.matched_titles(), vec!["Dune", "Dune Messiah"]);
    }

    #[test]
    fn test_search_substring_only_not_found() {
        let catalog = books(&[("Dune Messiah", 5), ("Emma", 2)]);
        let outcome = search(&catalog, "Dune");
        assert!(!outcome.found);
        assert_eq!(outcome.matched_titles(), vec!["Dune Messiah"]);
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let catalog = books(&[("Dune", 10)]);
        let outcome = search(&catalog, "dune");
        assert!(!outcome.found);
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_everything() {
        let catalog = books(&[("A", 1), ("B", 2)]);
        let outcome = search(&catalog, "");
        assert!(!outcome.found);
        assert_eq!(outcome.matches.len(), 2);
    }

    #[test]
    fn test_search_empty_query_with_empty_title_is_found() {
        let catalog = books(&[("", 1)]);
        assert!(search(&catalog, "").found);
    }

    #[test]
    fn test_search_empty_catalog() {
        let outcome = search(&[], "Dune");
        assert!(!outcome.found);
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn test_sorted_by_title_case_insensitive_and_stable() {
        let catalog = books(&[("banana", 1), ("Apple", 2), ("apple", 3)]);
        assert_eq!(sorted_by_title(&catalog), vec!["Apple", "apple", "banana"]);

        let catalog = books(&[("apple", 1), ("banana", 2), ("Apple", 3)]);
        assert_eq!(sorted_by_title(&catalog), vec!["apple", "Apple", "banana"]);
    }

    #[test]
    fn test_sorted_by_title_does_not_touch_input() {
        let catalog = books(&[("b", 1), ("a", 2)]);
        let _ = sorted_by_title(&catalog);
        assert_eq!(catalog[0].title, "b");
    }

    #[test]
    fn test_sorted_by_downloads_descending() {
        let catalog = books(&[("A", 5), ("B", 50), ("C", 1), ("D", 20)]);
        let sorted = sorted_by_downloads(&catalog);
        let counts: Vec<u64> = sorted.iter().map(|b| b.download_count).collect();
        assert_eq!(counts, vec![50, 20, 5, 1]);
        assert!(sorted.windows(2).all(|w| w[0].download_count >= w[1].download_count));

        let mut titles: Vec<_> = sorted.iter().map(|b| b.title.clone()).collect();
        titles.sort();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_sorted_by_downloads_ties_keep_catalog_order() {
        let catalog = books(&[("first", 7), ("big", 9), ("second", 7), ("third", 7)]);
        let titles: Vec<_> = sorted_by_downloads(&catalog)
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["big", "first", "second", "third"]);
    }

    #[test]
    fn test_most_downloaded_first_of_ties() {
        let catalog = books(&[("small", 1), ("early", 9), ("late", 9)]);
        assert_eq!(most_downloaded(&catalog).unwrap().title, "early");
    }

    #[test]
    fn test_most_downloaded_unique_max() {
        let catalog = books(&[("a", 3), ("b", 11), ("c", 4)]);
        assert_eq!(most_downloaded(&catalog).unwrap().title, "b");
    }

    #[test]
    fn test_most_downloaded_empty() {
        assert!(most_downloaded(&[]).is_none());
    }
}
