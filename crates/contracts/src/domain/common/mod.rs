//! Common types shared by all stored documents

pub mod aggregate_id;
pub mod entity_metadata;

pub use aggregate_id::AggregateId;
pub use entity_metadata::EntityMetadata;
