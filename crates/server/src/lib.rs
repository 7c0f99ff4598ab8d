//! HTTP and WebSocket adapter over a [`bookshelf_core::BookShelf`].

pub mod api;
pub mod metrics;
pub mod state;
