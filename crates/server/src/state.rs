use std::sync::Arc;
use bookshelf_core::{BookShelf, Config};

/// Shared application state
pub struct AppState {
    config: Config,
    shelf: Arc<BookShelf>,
}

impl AppState {
    pub fn new(config: Config, shelf: Arc<BookShelf>) -> Self {
        Self { config, shelf }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shelf(&self) -> &BookShelf {
        self.shelf.as_ref()
    }
}
