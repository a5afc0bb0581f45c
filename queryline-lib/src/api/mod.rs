//! Query execution operations

mod fetch;
mod pages;
pub mod query;
mod response;
mod url;

pub use pages::Pages;
pub use query::Query;
