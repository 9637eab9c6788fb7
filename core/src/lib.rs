//! Core of the Lunar Locator fleet map.
//!
//! Entities and their collection, headless views wired through an explicit
//! observer registry, routing, and the lunar map renderer behind a provider
//! seam. The GUI front-end draws what these types hold.

pub mod app;
pub mod collection;
pub mod entity;
pub mod map;
pub mod observer;
pub mod prelude;
pub mod router;
pub mod telemetry;
pub mod template;
pub mod views;

pub use app::AppContext;
pub use prelude::{Coords, LocatorError, LocatorResult, ShellSettings};
