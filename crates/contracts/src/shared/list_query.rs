//! Search, sort and pagination over an in-memory collection
//!
//! Shared by every list page: search is a case-insensitive substring match over
//! the entity's list-search fields, sort is single-key and stable, pages are
//! 1-based with a fixed size.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::metadata::{FieldMetadata, FormFields};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Trait for records that support text search
pub trait Searchable {
    /// Match against the list page search fields
    fn matches_filter(&self, filter: &str) -> bool;

    /// Match against the search-to-link fields
    fn matches_link_filter(&self, filter: &str) -> bool;
}

/// Trait for records that can be sorted by a named field
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

fn contains_ci<T: FormFields>(item: &T, filter: &str, pick: impl Fn(&FieldMetadata) -> bool) -> bool {
    let needle = filter.trim().to_lowercase();
    T::field_metadata().iter().filter(|f| pick(f)).any(|f| {
        item.field_value(f.name)
            .and_then(|v| v.as_text())
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    })
}

impl<T: FormFields> Searchable for T {
    fn matches_filter(&self, filter: &str) -> bool {
        filter.trim().is_empty() || contains_ci(self, filter, |f| f.ui.list_search)
    }

    fn matches_link_filter(&self, filter: &str) -> bool {
        !filter.trim().is_empty() && contains_ci(self, filter, |f| f.ui.link_search)
    }
}

impl<T: FormFields> Sortable for T {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        self.field_value(field).cmp(&other.field_value(field))
    }
}

/// Current sort column and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: String,
    pub ascending: bool,
}

impl SortConfig {
    pub fn ascending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            ascending: true,
        }
    }

    /// Header click: same field flips the direction, a new field starts ascending
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field.to_string();
            self.ascending = true;
        }
    }

    /// Sort indicator for a column header
    pub fn indicator(&self, field: &str) -> &'static str {
        if self.field == field {
            if self.ascending { " ▲" } else { " ▼" }
        } else {
            " ⇅"
        }
    }
}

/// Sorts the list by the given field.
///
/// Ascending order is stable. Descending order is the exact reverse of the
/// ascending one, ties included.
pub fn sort_list<T: Sortable>(items: &mut [T], sort: &SortConfig) {
    items.sort_by(|a, b| a.compare_by_field(b, &sort.field));
    if !sort.ascending {
        items.reverse();
    }
}

/// Filters the list by the search term; a blank term keeps everything
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.matches_filter(filter))
        .cloned()
        .collect()
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1)).max(1)
}

/// One display-ready page
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    /// Number of records matching the search, across all pages
    pub total_count: usize,
}

/// Search, sort and cut one page out of `items`.
///
/// `page` is 1-based. Pages outside `[1, total_pages]` come back empty; only
/// the navigation helpers on [`ListState`] clamp.
pub fn process<T: Searchable + Sortable + Clone>(
    items: &[T],
    search: &str,
    sort: Option<&SortConfig>,
    page: usize,
    page_size: usize,
) -> ListPage<T> {
    let mut matched = filter_list(items, search);
    if let Some(sort) = sort {
        sort_list(&mut matched, sort);
    }

    let page_size = page_size.max(1);
    let total_count = matched.len();
    let total_pages = total_pages(total_count, page_size);
    let items = match page.checked_sub(1) {
        Some(index) => matched
            .into_iter()
            .skip(index.saturating_mul(page_size))
            .take(page_size)
            .collect(),
        None => Vec::new(),
    };

    ListPage {
        items,
        page,
        total_pages,
        total_count,
    }
}

/// State of a list page: search term, sort, current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListState {
    pub search: String,
    pub sort: Option<SortConfig>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// New search term; always returns to the first page
    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.page = 1;
    }

    pub fn toggle_sort(&mut self, field: &str) {
        match &mut self.sort {
            Some(sort) => sort.toggle(field),
            None => self.sort = Some(SortConfig::ascending(field)),
        }
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to_page(self.page.saturating_add(1), total_pages);
    }

    pub fn prev_page(&mut self, total_pages: usize) {
        self.go_to_page(self.page.saturating_sub(1), total_pages);
    }

    /// Jump to `page`, clamped to `[1, total_pages]`
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn apply<T: Searchable + Sortable + Clone>(&self, items: &[T]) -> ListPage<T> {
        process(items, &self.search, self.sort.as_ref(), self.page, self.page_size)
    }
}
