use {
    crate::{
        constant::Constant,
        constraint::{Constraint, ConstraintType},
        error::Error,
        schema::Schema,
        sequence::Sequence,
        table::{Column, CreateTableArgs},
        trigger::TriggerObject,
        Result, SCHEMA_INFORMATION, SCHEMA_MAIN,
    },
    def::{
        BoxError, DataType, DatabaseCatalog, DbObject, ObjectId, ObjectKind, SchemaId,
        SchemaObject, SchemaObjectRef, Session, User, Value,
    },
    rand::prelude::*,
    std::{
        collections::{HashMap, HashSet},
        sync::{
            atomic::{AtomicU32, Ordering},
            Arc, Mutex, RwLock,
        },
        thread,
    },
};

#[derive(Debug)]
struct TestObject {
    id: ObjectId,
    schema_id: SchemaId,
    kind: ObjectKind,
    name: RwLock<String>,
}

impl TestObject {
    fn new(schema_id: SchemaId, id: ObjectId, kind: ObjectKind, name: &str) -> Arc<Self> {
        Arc::new(Self {
            id,
            schema_id,
            kind,
            name: RwLock::new(name.to_string()),
        })
    }
}

impl DbObject for TestObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn name(&self) -> String {
        self.name.read().unwrap().clone()
    }

    fn create_sql(&self) -> Option<String> {
        None
    }
}

impl SchemaObject for TestObject {
    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn schema_id(&self) -> SchemaId {
        self.schema_id
    }

    fn rename(&self, new_name: &str) {
        *self.name.write().unwrap() = new_name.to_string();
    }
}

#[derive(Default)]
struct TestSession {
    temp_tables: HashMap<String, SchemaObjectRef>,
}

impl Session for TestSession {
    fn find_local_temp_table(&self, name: &str) -> Option<SchemaObjectRef> {
        self.temp_tables.get(name).cloned()
    }
}

struct TestDatabase {
    schema: Arc<Schema>,
    next_id: AtomicU32,
    removed: Mutex<Vec<(ObjectKind, String)>>,
    meta_removed: Mutex<bool>,
}

impl TestDatabase {
    fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            next_id: AtomicU32::new(100),
            removed: Mutex::new(Vec::new()),
            meta_removed: Mutex::new(false),
        }
    }
}

impl DatabaseCatalog for TestDatabase {
    fn allocate_id(&self) -> ObjectId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn remove_schema_object(
        &self,
        _session: &dyn Session,
        obj: &SchemaObjectRef,
    ) -> std::result::Result<(), BoxError> {
        self.removed.lock().unwrap().push((obj.kind(), obj.name()));
        self.schema.remove(obj).map_err(|e| Box::new(e) as BoxError)
    }

    fn remove_meta(
        &self,
        _session: &dyn Session,
        schema_id: SchemaId,
    ) -> std::result::Result<(), BoxError> {
        assert_eq!(schema_id, self.schema.id());
        *self.meta_removed.lock().unwrap() = true;
        Ok(())
    }
}

/// A catalog whose object removal never deregisters anything.
struct StuckDatabase;

impl DatabaseCatalog for StuckDatabase {
    fn allocate_id(&self) -> ObjectId {
        0
    }

    fn remove_schema_object(
        &self,
        _session: &dyn Session,
        _obj: &SchemaObjectRef,
    ) -> std::result::Result<(), BoxError> {
        Ok(())
    }

    fn remove_meta(
        &self,
        _session: &dyn Session,
        _schema_id: SchemaId,
    ) -> std::result::Result<(), BoxError> {
        Ok(())
    }
}

fn test_schema(name: &str) -> Arc<Schema> {
    let owner = Arc::new(User::new(1, "ADMIN".to_string()));
    Arc::new(Schema::new(10, name.to_string(), owner, false))
}

#[test]
fn schema_lifecycle() -> Result<()> {
    let schema = test_schema("APP");

    let table = schema.create_table(CreateTableArgs {
        id: 11,
        name: "T".to_string(),
        columns: vec![Column::new("A".to_string(), DataType::Int, false)],
        persistent: true,
        clustered: false,
    });
    schema.add(table.clone())?;

    let constraint_name = schema.unique_constraint_name(&*table)?;
    assert!(constraint_name.starts_with("CONSTRAINT_"));

    let constraint = Arc::new(Constraint::new(
        schema.id(),
        12,
        constraint_name.clone(),
        "T".to_string(),
        ConstraintType::PrimaryKey {
            columns: vec!["A".to_string()],
        },
    ));
    schema.add(constraint)?;
    assert!(schema.find_constraint(&constraint_name).is_some());

    let table: SchemaObjectRef = table;
    schema.rename(&table, "T2")?;
    assert!(schema.find_table_or_view(None, "T").is_none());
    let found = schema.find_table_or_view(None, "T2").unwrap();
    assert!(Arc::ptr_eq(&found, &table));
    assert_eq!(table.name(), "T2");

    let session = TestSession::default();
    let database = TestDatabase::new(schema.clone());
    schema.remove_children_and_resources(&session, &database)?;

    assert!(schema.owner().is_none());
    for kind in ObjectKind::ALL {
        assert!(schema.all(kind)?.is_empty());
    }
    assert!(*database.meta_removed.lock().unwrap());

    // identity queries survive invalidation, mutations do not
    assert_eq!(schema.name(), "APP");
    assert_eq!(schema.id(), 10);
    let late = schema.create_table(CreateTableArgs {
        id: 13,
        name: "T3".to_string(),
        columns: vec![],
        persistent: true,
        clustered: false,
    });
    assert!(matches!(schema.add(late).unwrap_err(), Error::Internal { .. }));

    Ok(())
}

#[test]
fn teardown_removes_kinds_in_order() -> Result<()> {
    let schema = test_schema("APP");
    let sid = schema.id();

    schema.add(Arc::new(Constant::new(sid, 2, "C".to_string(), Value::Int(1))))?;
    schema.add(Arc::new(Sequence::new(sid, 3, "SEQ".to_string(), 0, 1)))?;
    schema.add(TestObject::new(sid, 4, ObjectKind::Index, "IDX"))?;
    let table = schema.create_table(CreateTableArgs {
        id: 5,
        name: "T".to_string(),
        columns: vec![Column::new("A".to_string(), DataType::Int, false)],
        persistent: true,
        clustered: false,
    });
    schema.add(table)?;
    schema.add(Arc::new(Constraint::new(
        sid,
        6,
        "PK".to_string(),
        "T".to_string(),
        ConstraintType::PrimaryKey {
            columns: vec!["A".to_string()],
        },
    )))?;
    schema.add(Arc::new(TriggerObject::new(
        sid,
        7,
        "TR".to_string(),
        "T".to_string(),
        true,
        TriggerObject::INSERT,
        "org.example.Audit".to_string(),
    )))?;

    let database = TestDatabase::new(schema.clone());
    schema.remove_children_and_resources(&TestSession::default(), &database)?;

    let removed = database.removed.lock().unwrap();
    let kinds: Vec<ObjectKind> = removed.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(
        kinds,
        vec![
            ObjectKind::Trigger,
            ObjectKind::Constraint,
            ObjectKind::TableOrView,
            ObjectKind::Index,
            ObjectKind::Sequence,
            ObjectKind::Constant,
        ]
    );

    Ok(())
}

#[test]
fn teardown_requires_progress() {
    let schema = test_schema("APP");
    schema
        .add(TestObject::new(schema.id(), 2, ObjectKind::Constant, "C"))
        .unwrap();

    let err = schema
        .remove_children_and_resources(&TestSession::default(), &StuckDatabase)
        .unwrap_err();
    assert!(matches!(err, Error::Internal { .. }));
}

#[test]
fn concurrent_unique_names_are_distinct() {
    let schema = test_schema("APP");
    let source = TestObject::new(schema.id(), 2, ObjectKind::TableOrView, "T");

    let names: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| schema.unique_constraint_name(&*source).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let distinct: HashSet<&String> = names.iter().collect();
    assert_eq!(distinct.len(), names.len());
    for name in &names {
        assert!(schema.find_constraint(name).is_none());
    }
}

#[test]
fn committed_names_are_skipped_and_released() -> Result<()> {
    let schema = test_schema("APP");
    let source = TestObject::new(schema.id(), 2, ObjectKind::TableOrView, "T");

    let first = schema.unique_constraint_name(&*source)?;
    // committing an object under the reserved name releases the reservation
    schema.add(Arc::new(Constraint::new(
        schema.id(),
        3,
        first.clone(),
        "T".to_string(),
        ConstraintType::Unique {
            columns: vec!["A".to_string()],
        },
    )))?;

    // the name is committed now, the generator may not hand it out again
    let second = schema.unique_constraint_name(&*source)?;
    assert_ne!(first, second);
    assert!(schema.find_constraint(&second).is_none());

    // an explicit release returns an uncommitted reservation to the pool
    schema.free_unique_name(&second);
    assert_eq!(schema.unique_constraint_name(&*source)?, second);

    Ok(())
}

#[test]
fn unique_index_names_use_the_caller_prefix() -> Result<()> {
    let schema = test_schema("APP");
    let source = TestObject::new(schema.id(), 2, ObjectKind::TableOrView, "T");

    let name = schema.unique_index_name(&*source, "INDEX_")?;
    assert!(name.starts_with("INDEX_"));

    let again = schema.unique_index_name(&*source, "INDEX_")?;
    assert_ne!(name, again);

    Ok(())
}

#[test]
fn system_schemas_are_protected() {
    let owner = Arc::new(User::new(1, "SA".to_string()));
    let information = Schema::new(0, SCHEMA_INFORMATION.to_string(), owner.clone(), true);
    let main = Schema::new(1, SCHEMA_MAIN.to_string(), owner.clone(), false);
    let app = Schema::new(2, "APP".to_string(), owner, false);

    assert!(!information.can_drop());
    assert!(!main.can_drop());
    assert!(app.can_drop());
}

#[test]
fn schema_ddl() {
    let owner = Arc::new(User::new(1, "U".to_string()));

    let schema = Schema::new(2, "S".to_string(), owner.clone(), false);
    assert_eq!(
        schema.create_sql().unwrap(),
        r#"CREATE SCHEMA "S" AUTHORIZATION "U""#
    );
    assert!(schema.drop_sql().is_none());

    let system = Schema::new(0, SCHEMA_INFORMATION.to_string(), owner, true);
    assert!(system.create_sql().is_none());
}

#[test]
fn table_lookup_falls_back_to_local_temp_tables() {
    let schema = test_schema("APP");
    let temp: SchemaObjectRef = TestObject::new(schema.id(), 2, ObjectKind::TableOrView, "TMP");

    let mut session = TestSession::default();
    session.temp_tables.insert("TMP".to_string(), temp.clone());

    assert!(schema.find_table_or_view(None, "TMP").is_none());
    let found = schema.find_table_or_view(Some(&session), "TMP").unwrap();
    assert!(Arc::ptr_eq(&found, &temp));

    let err = schema.get_table_or_view(None, "TMP").unwrap_err();
    assert!(matches!(err, Error::TableOrViewNotFound { name } if name == "TMP"));
}

#[test]
fn add_checks_the_owning_schema() {
    let schema = test_schema("APP");
    let foreign = TestObject::new(schema.id() + 1, 2, ObjectKind::Constant, "C");

    assert!(matches!(
        schema.add(foreign).unwrap_err(),
        Error::Internal { .. }
    ));
}

#[test]
fn rename_to_the_current_name_is_rejected() -> Result<()> {
    let schema = test_schema("APP");
    let obj = TestObject::new(schema.id(), 2, ObjectKind::Sequence, "SEQ");
    schema.add(obj.clone())?;

    let obj: SchemaObjectRef = obj;
    let err = schema.rename(&obj, "SEQ").unwrap_err();
    assert!(matches!(err, Error::DuplicateName { .. }));

    Ok(())
}

#[test]
fn kind_specific_not_found_errors() {
    let schema = test_schema("APP");

    assert!(matches!(
        schema.get_index("I").unwrap_err(),
        Error::IndexNotFound { name } if name == "I"
    ));
    assert!(matches!(
        schema.get_sequence("S").unwrap_err(),
        Error::SequenceNotFound { .. }
    ));
    assert!(matches!(
        schema.get_constraint("C").unwrap_err(),
        Error::ConstraintNotFound { .. }
    ));
    assert!(matches!(
        schema.get_constant("K").unwrap_err(),
        Error::ConstantNotFound { .. }
    ));
}

#[test]
fn random_mutations_keep_registries_consistent() -> Result<()> {
    let schema = test_schema("APP");
    let mut rng = rand::thread_rng();
    let mut alive: Vec<SchemaObjectRef> = Vec::new();
    let mut next_id = 100;

    for _ in 0..500 {
        match rng.gen_range(0..3) {
            0 => {
                let name = format!("C{}", rng.gen_range(0..40));
                if schema.find_constant(&name).is_none() {
                    let obj: SchemaObjectRef =
                        TestObject::new(schema.id(), next_id, ObjectKind::Constant, &name);
                    next_id += 1;
                    schema.add(obj.clone())?;
                    alive.push(obj);
                }
            }
            1 => {
                if !alive.is_empty() {
                    let i = rng.gen_range(0..alive.len());
                    let obj = alive.swap_remove(i);
                    schema.remove(&obj)?;
                }
            }
            _ => {
                if !alive.is_empty() {
                    let i = rng.gen_range(0..alive.len());
                    let new_name = format!("C{}", rng.gen_range(40..80));
                    if schema.find_constant(&new_name).is_none() && alive[i].name() != new_name {
                        schema.rename(&alive[i], &new_name)?;
                    }
                }
            }
        }

        // every live object is reachable under exactly its current name
        let all = schema.all(ObjectKind::Constant)?;
        assert_eq!(all.len(), alive.len());
        let names: HashSet<String> = all.iter().map(|obj| obj.name()).collect();
        assert_eq!(names.len(), alive.len());
        for obj in &alive {
            let found = schema.find_constant(&obj.name()).unwrap();
            assert!(Arc::ptr_eq(&found, obj));
        }
    }

    Ok(())
}
