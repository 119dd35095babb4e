use std::{fmt::Display, sync::Arc};

pub type ObjectId = u32;
pub type SchemaId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    TableOrView,
    Index,
    Sequence,
    Trigger,
    Constraint,
    Constant,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 6] = [
        ObjectKind::TableOrView,
        ObjectKind::Index,
        ObjectKind::Sequence,
        ObjectKind::Trigger,
        ObjectKind::Constraint,
        ObjectKind::Constant,
    ];
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::TableOrView => "table or view",
                Self::Index => "index",
                Self::Sequence => "sequence",
                Self::Trigger => "trigger",
                Self::Constraint => "constraint",
                Self::Constant => "constant",
            }
        )
    }
}

pub trait DbObject: Send + Sync + std::fmt::Debug {
    fn id(&self) -> ObjectId;
    fn name(&self) -> String;
    fn create_sql(&self) -> Option<String>;

    fn drop_sql(&self) -> Option<String> {
        None
    }
}

/// An object that lives inside exactly one schema. The back-reference to the
/// owning schema is an id, never an owning edge: a table's lifetime may be
/// shared with other subsystems, the registry only holds the lookup path.
pub trait SchemaObject: DbObject {
    fn kind(&self) -> ObjectKind;
    fn schema_id(&self) -> SchemaId;
    fn rename(&self, new_name: &str);
}

pub type SchemaObjectRef = Arc<dyn SchemaObject>;
