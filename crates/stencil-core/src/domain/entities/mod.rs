pub mod class_path;
pub mod entity;

pub use class_path::{ClassPath, GenerationContext, Root};
pub use entity::{DEFAULT_PARENT_KEY, Entity, EntityBuilder, EntityProperty, ParentRelationship};
