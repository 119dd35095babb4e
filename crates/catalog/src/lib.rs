// Internal consistency checks are compiled into debug builds; the `check`
// feature forces them on elsewhere.
pub(crate) const CHECK: bool = cfg!(any(debug_assertions, feature = "check"));

pub const SCHEMA_INFORMATION: &str = "INFORMATION_SCHEMA";
pub const SCHEMA_MAIN: &str = "PUBLIC";

macro_rules! impl_schema_object {
    ($($ty:ident => $kind:ident,)*) => {
        $(
            impl def::DbObject for $ty {
                fn id(&self) -> def::ObjectId {
                    self.id
                }

                fn name(&self) -> String {
                    self.name.read().unwrap().clone()
                }

                fn create_sql(&self) -> Option<String> {
                    Some(self.create_sql_text())
                }
            }

            impl def::SchemaObject for $ty {
                fn kind(&self) -> def::ObjectKind {
                    def::ObjectKind::$kind
                }

                fn schema_id(&self) -> def::SchemaId {
                    self.schema_id
                }

                fn rename(&self, new_name: &str) {
                    *self.name.write().unwrap() = new_name.to_string();
                }
            }
        )*
    };
}

mod constant;
mod constraint;
mod error;
mod names;
mod registry;
mod schema;
mod sequence;
mod table;
mod trigger;

#[cfg(test)]
mod tests;

pub use {
    constant::Constant,
    constraint::{Constraint, ConstraintType},
    error::{Error, Result},
    schema::Schema,
    sequence::Sequence,
    table::{Column, CreateTableArgs, CreateTableLinkArgs, TableData, TableLink},
    trigger::TriggerObject,
};
