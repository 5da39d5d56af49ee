//! mapform - browser-side helpers for location search forms
//!
//! A radius picker on a Leaflet map, client-side table sorting and a few form
//! toggles. The logic is platform independent and talks to the page and the
//! map through the `page::Page` and `ui::MapSurface` traits; `web` binds them
//! to the browser when built for wasm32.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod config;
pub mod error;
pub mod forms;
pub mod geo;
pub mod memory;
pub mod numeric;
pub mod page;
pub mod table;

pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{Error, Result};
