mod catalog;
mod cursor;
mod data_type;
mod object;
mod session;
mod sql;
mod user;
mod value;

pub use {
    catalog::{BoxError, DatabaseCatalog},
    cursor::{Cursor, SingleRowCursor},
    data_type::DataType,
    object::{DbObject, ObjectId, ObjectKind, SchemaId, SchemaObject, SchemaObjectRef},
    session::Session,
    sql::{quote_identifier, quote_string},
    user::User,
    value::Value,
};
