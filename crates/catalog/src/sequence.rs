use {
    def::{quote_identifier, ObjectId, SchemaId},
    std::sync::{Mutex, RwLock},
};

#[derive(Debug)]
pub struct Sequence {
    id: ObjectId,
    schema_id: SchemaId,
    name: RwLock<String>,
    value: Mutex<i64>,
    increment: i64,
}

impl Sequence {
    pub fn new(
        schema_id: SchemaId,
        id: ObjectId,
        name: String,
        start_value: i64,
        increment: i64,
    ) -> Self {
        Self {
            id,
            schema_id,
            name: RwLock::new(name),
            value: Mutex::new(start_value),
            increment,
        }
    }

    pub fn increment(&self) -> i64 {
        self.increment
    }

    pub fn next_value(&self) -> i64 {
        let mut value = self.value.lock().unwrap();
        *value += self.increment;
        *value
    }

    fn create_sql_text(&self) -> String {
        let mut sql = format!(
            "CREATE SEQUENCE {} START WITH {}",
            quote_identifier(&self.name.read().unwrap()),
            *self.value.lock().unwrap()
        );
        if self.increment != 1 {
            sql.push_str(&format!(" INCREMENT BY {}", self.increment));
        }
        sql
    }
}

impl_schema_object! {
    Sequence => Sequence,
}
