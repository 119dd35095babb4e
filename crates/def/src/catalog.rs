use crate::{
    object::{ObjectId, SchemaId, SchemaObjectRef},
    session::Session,
};

pub type BoxError = Box<dyn std::error::Error>;

/// The top-level database catalog owning all schemas. Any removal with
/// cross-schema or persisted-metadata effects must go through these entry
/// points, never around them.
pub trait DatabaseCatalog {
    fn allocate_id(&self) -> ObjectId;

    /// Removes one schema object, deregistering it from its schema and
    /// releasing catalog-wide resources as a side effect.
    fn remove_schema_object(
        &self,
        session: &dyn Session,
        obj: &SchemaObjectRef,
    ) -> Result<(), BoxError>;

    /// Deletes the persisted catalog row of the schema itself.
    fn remove_meta(&self, session: &dyn Session, schema_id: SchemaId) -> Result<(), BoxError>;
}
