//! Record formats
//!
//! Every representation of a record is a [`Format`]: the sheet text itself, YAML, JSON, and a
//! read-only human summary. The [`FormatRegistry`] selects one by name, which is how callers
//! (the CLI, a request handler) dispatch on a content type.
//!
//!     text      sheet text, both directions (grammar-level conversion)
//!     yaml      structural dump/load, defaults the object kind on load
//!     json      same structure as yaml
//!     summary   serialization only

pub mod format;
pub mod json;
pub mod registry;
pub mod summary;
pub mod text;
pub mod yaml;

pub use format::Format;
pub use json::JsonFormat;
pub use registry::FormatRegistry;
pub use summary::SummaryFormat;
pub use text::TextFormat;
pub use yaml::YamlFormat;
