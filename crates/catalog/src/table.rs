use {
    def::{quote_identifier, quote_string, DataType, ObjectId, SchemaId},
    std::sync::RwLock,
};

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub is_nullable: bool,
}

impl Column {
    pub fn new(name: String, data_type: DataType, is_nullable: bool) -> Self {
        Self {
            name,
            data_type,
            is_nullable,
        }
    }

    fn sql_text(&self) -> String {
        let mut text = format!(
            "{} {}",
            quote_identifier(&self.name),
            self.data_type.sql_text()
        );
        if !self.is_nullable {
            text.push_str(" NOT NULL");
        }
        text
    }
}

#[derive(Debug)]
pub struct CreateTableArgs {
    pub id: ObjectId,
    pub name: String,
    pub columns: Vec<Column>,
    pub persistent: bool,
    pub clustered: bool,
}

#[derive(Debug)]
pub struct TableData {
    id: ObjectId,
    schema_id: SchemaId,
    name: RwLock<String>,
    columns: Vec<Column>,
    persistent: bool,
    clustered: bool,
}

impl TableData {
    pub(crate) fn new(schema_id: SchemaId, args: CreateTableArgs) -> Self {
        Self {
            id: args.id,
            schema_id,
            name: RwLock::new(args.name),
            columns: args.columns,
            persistent: args.persistent,
            clustered: args.clustered,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn is_clustered(&self) -> bool {
        self.clustered
    }

    fn create_sql_text(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(Column::sql_text)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{} {}({})",
            if self.persistent {
                "CREATE TABLE"
            } else {
                "CREATE MEMORY TABLE"
            },
            quote_identifier(&self.name.read().unwrap()),
            columns
        )
    }
}

#[derive(Debug)]
pub struct CreateTableLinkArgs {
    pub id: ObjectId,
    pub name: String,
    pub driver: String,
    pub url: String,
    pub user: String,
    pub password: String,
    pub original_table: String,
    pub emit_updates: bool,
    pub force: bool,
}

/// A table backed by a connection to another database.
#[derive(Debug)]
pub struct TableLink {
    id: ObjectId,
    schema_id: SchemaId,
    name: RwLock<String>,
    driver: String,
    url: String,
    user: String,
    password: String,
    original_table: String,
    emit_updates: bool,
    force: bool,
}

impl TableLink {
    pub(crate) fn new(schema_id: SchemaId, args: CreateTableLinkArgs) -> Self {
        Self {
            id: args.id,
            schema_id,
            name: RwLock::new(args.name),
            driver: args.driver,
            url: args.url,
            user: args.user,
            password: args.password,
            original_table: args.original_table,
            emit_updates: args.emit_updates,
            force: args.force,
        }
    }

    pub fn original_table(&self) -> &str {
        &self.original_table
    }

    fn create_sql_text(&self) -> String {
        let mut sql = format!(
            "{} {}({}, {}, {}, {}, {})",
            if self.force {
                "CREATE FORCE LINKED TABLE"
            } else {
                "CREATE LINKED TABLE"
            },
            quote_identifier(&self.name.read().unwrap()),
            quote_string(&self.driver),
            quote_string(&self.url),
            quote_string(&self.user),
            quote_string(&self.password),
            quote_string(&self.original_table),
        );
        if self.emit_updates {
            sql.push_str(" EMIT UPDATES");
        }
        sql
    }
}

impl_schema_object! {
    TableData => TableOrView,
    TableLink => TableOrView,
}
