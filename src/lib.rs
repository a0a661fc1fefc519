//! resdoc: reStructuredText reference pages for infrastructure resource classes.
//!
//! A class graph (loaded by [`metadata::json::JsonMetadata`] or any other
//! [`MetadataSource`]) is classified into standalone resources, finders and
//! nested subresources. Each standalone class is resolved into an attribute
//! tree, decorated with sentences derived from its validation annotations, and
//! rendered into one page. [`site::generate`] assembles the full document set.

pub mod classify;
pub mod config;
pub mod constraint;
pub mod error;
pub mod link;
pub mod logging;
pub mod metadata;
pub mod model;
pub mod render;
pub mod resolve;
pub mod site;
pub mod text;

pub use config::Config;
pub use error::{Error, Result};
pub use metadata::json::JsonMetadata;
pub use metadata::MetadataSource;
pub use model::{AttributeKind, AttributeRecord, Mode, Page, ResourceDescriptor, ResourceKind};
pub use resolve::Resolver;
pub use site::{generate, OutputFile};
