//! REST client for the Tator media-annotation service.
//!
//! [`client::TatorClient`] wraps the count/list/update/delete primitives
//! the bulk operations compose; [`directory::ProjectDirectory`] holds the
//! re-fetchable project snapshot and resolves project specs.

pub mod client;
pub mod directory;
pub mod models;
pub mod query;

pub use client::{TatorClient, TatorError};
pub use directory::ProjectDirectory;
