use crate::object::SchemaObjectRef;

pub trait Session {
    /// Session-private temporary tables are never registered in a schema;
    /// table lookups fall back to this before giving up.
    fn find_local_temp_table(&self, name: &str) -> Option<SchemaObjectRef>;
}
