//! Queryline API client library
//!
//! A Rust async client for remote data-query services speaking the
//! `/s:{service_id}/get/{namespace}/{query}` HTTP+JSON protocol.

pub mod api;
pub mod error;

mod client;

pub use api::query::Direction;
pub use api::query::Filter;
pub use api::query::OrderBy;
pub use api::query::Page;
pub use api::query::Query;
pub use api::Pages;
pub use client::*;
