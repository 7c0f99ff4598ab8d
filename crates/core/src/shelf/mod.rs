//! Book shelf: the in-memory catalog and its queries.
//!
//! [`BookShelf`] holds the most recently fetched catalog, exposes search,
//! sorting and most-downloaded queries over it, and publishes
//! [`ShelfEvent`]s so a presentation layer can follow changes without the
//! core depending on it.
//!
//! The query functions in [`query`] are pure and can be used on any slice of
//! books.

mod events;
pub mod query;
mod state;
mod types;

pub use events::{ShelfBroadcaster, ShelfEvent};
pub use state::BookShelf;
pub use types::*;
