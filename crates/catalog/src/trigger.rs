use {
    def::{quote_identifier, quote_string, ObjectId, SchemaId},
    std::sync::RwLock,
};

#[derive(Debug)]
pub struct TriggerObject {
    id: ObjectId,
    schema_id: SchemaId,
    name: RwLock<String>,
    table_name: String,
    before: bool,
    type_mask: u8,
    class_name: String,
}

impl TriggerObject {
    pub const INSERT: u8 = 1;
    pub const UPDATE: u8 = 2;
    pub const DELETE: u8 = 4;

    pub fn new(
        schema_id: SchemaId,
        id: ObjectId,
        name: String,
        table_name: String,
        before: bool,
        type_mask: u8,
        class_name: String,
    ) -> Self {
        Self {
            id,
            schema_id,
            name: RwLock::new(name),
            table_name,
            before,
            type_mask,
            class_name,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn type_names(&self) -> String {
        let mut names = Vec::new();
        if self.type_mask & Self::INSERT != 0 {
            names.push("INSERT");
        }
        if self.type_mask & Self::UPDATE != 0 {
            names.push("UPDATE");
        }
        if self.type_mask & Self::DELETE != 0 {
            names.push("DELETE");
        }
        names.join(", ")
    }

    fn create_sql_text(&self) -> String {
        format!(
            "CREATE TRIGGER {} {} {} ON {} CALL {}",
            quote_identifier(&self.name.read().unwrap()),
            if self.before { "BEFORE" } else { "AFTER" },
            self.type_names(),
            quote_identifier(&self.table_name),
            quote_string(&self.class_name)
        )
    }
}

impl_schema_object! {
    TriggerObject => Trigger,
}
