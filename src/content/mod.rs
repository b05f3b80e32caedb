//! Content module - collections, frontmatter parsing and schema validation

mod entry;
mod error;
mod frontmatter;
pub mod loader;
mod schema;

pub use entry::{BlogData, BlogEntry, Collection, ResumeEntry, ResumeItem, ResumeKind};
pub use error::LoadError;
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::ContentStore;
pub use schema::{FieldIssue, SchemaValidationError};
