pub mod catalog;
pub mod config;
pub mod metrics;
pub mod shelf;
pub mod testing;

pub use catalog::{Author, Book, CatalogFetcher, FetchError, FetchErrorKind, HttpCatalogFetcher};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogSourceConfig, Config, ConfigError,
    ServerConfig,
};
pub use shelf::{
    BookShelf, HomeSummary, NavigationRequest, RefreshOutcome, SearchOutcome, SearchStatus,
    ShelfBroadcaster, ShelfEvent, ShelfSnapshot,
};
