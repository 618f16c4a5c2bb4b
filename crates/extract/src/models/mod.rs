mod document;
mod metadata;

pub use self::document::{DocumentMetadata, MetadataDefaults};
pub use self::metadata::Metadata;
