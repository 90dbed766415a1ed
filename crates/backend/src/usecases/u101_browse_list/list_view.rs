use std::marker::PhantomData;

use contracts::shared::list_query::{filter_list, total_pages, ListPage, ListState};

use crate::shared::config::Config;
use crate::shared::data::{GeoStore, Stored};

/// List page of one entity: search box, sortable headers and pager.
///
/// The state survives store changes; the page is recomputed from the store
/// on every call.
#[derive(Debug, Clone)]
pub struct ListView<T: Stored> {
    state: ListState,
    _entity: PhantomData<T>,
}

impl<T: Stored> ListView<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: ListState::with_page_size(page_size),
            _entity: PhantomData,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.console.page_size)
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn page(&self, store: &GeoStore) -> ListPage<T> {
        self.state.apply(store.items::<T>())
    }

    pub fn search(&mut self, term: &str) {
        self.state.set_search(term);
    }

    /// Header click on `field`
    pub fn sort_by(&mut self, field: &str) {
        self.state.toggle_sort(field);
    }

    pub fn sort_indicator(&self, field: &str) -> &'static str {
        match &self.state.sort {
            Some(sort) => sort.indicator(field),
            None => " ⇅",
        }
    }

    pub fn next_page(&mut self, store: &GeoStore) {
        let total = self.total_pages(store);
        self.state.next_page(total);
    }

    pub fn prev_page(&mut self, store: &GeoStore) {
        let total = self.total_pages(store);
        self.state.prev_page(total);
    }

    pub fn go_to_page(&mut self, page: usize, store: &GeoStore) {
        let total = self.total_pages(store);
        self.state.go_to_page(page, total);
    }

    fn total_pages(&self, store: &GeoStore) -> usize {
        let matched = filter_list(store.items::<T>(), &self.state.search).len();
        total_pages(matched, self.state.page_size)
    }
}
