use {
    def::{quote_identifier, ObjectId, SchemaId, Value},
    std::sync::RwLock,
};

#[derive(Debug)]
pub struct Constant {
    id: ObjectId,
    schema_id: SchemaId,
    name: RwLock<String>,
    value: Value,
}

impl Constant {
    pub fn new(schema_id: SchemaId, id: ObjectId, name: String, value: Value) -> Self {
        Self {
            id,
            schema_id,
            name: RwLock::new(name),
            value,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    fn create_sql_text(&self) -> String {
        format!(
            "CREATE CONSTANT {} VALUE {}",
            quote_identifier(&self.name.read().unwrap()),
            self.value.sql_text()
        )
    }
}

impl_schema_object! {
    Constant => Constant,
}
