//! UI layer: app shell, product list and form panels, and the backend bridge.

pub mod app;

pub use app::CatalogApp;
