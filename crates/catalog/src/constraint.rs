use {
    def::{quote_identifier, ObjectId, SchemaId},
    std::sync::RwLock,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintType {
    PrimaryKey { columns: Vec<String> },
    Unique { columns: Vec<String> },
    Referential { ref_table: String },
    Check { expression: String },
}

#[derive(Debug)]
pub struct Constraint {
    id: ObjectId,
    schema_id: SchemaId,
    name: RwLock<String>,
    table_name: String,
    constraint_type: ConstraintType,
}

impl Constraint {
    pub fn new(
        schema_id: SchemaId,
        id: ObjectId,
        name: String,
        table_name: String,
        constraint_type: ConstraintType,
    ) -> Self {
        Self {
            id,
            schema_id,
            name: RwLock::new(name),
            table_name,
            constraint_type,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn constraint_type(&self) -> &ConstraintType {
        &self.constraint_type
    }

    fn create_sql_text(&self) -> String {
        let head = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} ",
            quote_identifier(&self.table_name),
            quote_identifier(&self.name.read().unwrap())
        );

        match &self.constraint_type {
            ConstraintType::PrimaryKey { columns } => {
                format!("{}PRIMARY KEY({})", head, column_list(columns))
            }
            ConstraintType::Unique { columns } => {
                format!("{}UNIQUE({})", head, column_list(columns))
            }
            ConstraintType::Referential { ref_table } => {
                format!("{}FOREIGN KEY REFERENCES {}", head, quote_identifier(ref_table))
            }
            ConstraintType::Check { expression } => {
                format!("{}CHECK({})", head, expression)
            }
        }
    }
}

fn column_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|column| quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ")
}

impl_schema_object! {
    Constraint => Constraint,
}
