//! Helper functions shared by the content store, the query service and the CLI

mod date;
mod url;

pub use date::*;
pub use url::*;
