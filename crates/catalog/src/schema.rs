use {
    crate::{
        error::{self, Result},
        names::PendingNames,
        registry::Registry,
        table::{CreateTableArgs, CreateTableLinkArgs, TableData, TableLink},
        CHECK, SCHEMA_INFORMATION, SCHEMA_MAIN,
    },
    def::{
        quote_identifier, DatabaseCatalog, DbObject, ObjectKind, SchemaId, SchemaObjectRef,
        Session, User,
    },
    snafu::prelude::*,
    std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    tracing::debug,
};

// Teardown drains kinds in this order; within a kind the order is arbitrary.
const REMOVE_ORDER: [ObjectKind; 6] = [
    ObjectKind::Trigger,
    ObjectKind::Constraint,
    ObjectKind::TableOrView,
    ObjectKind::Index,
    ObjectKind::Sequence,
    ObjectKind::Constant,
];

/// A schema as created by the SQL statement CREATE SCHEMA.
pub struct Schema {
    id: SchemaId,
    name: String,
    system: bool,
    state: RwLock<SchemaState>,
}

struct SchemaState {
    owner: Option<Arc<User>>,
    registry: Registry,
    pending: PendingNames,
    valid: bool,
}

macro_rules! find_methods {
    ($($fn_name:ident => $kind:ident,)*) => {
        $(
            pub fn $fn_name(&self, name: &str) -> Option<SchemaObjectRef> {
                let state = self.state.read().ok()?;
                state.registry.find(ObjectKind::$kind, name)
            }
        )*
    };
}

macro_rules! get_methods {
    ($($fn_name:ident => $kind:ident, $not_found:ident;)*) => {
        $(
            pub fn $fn_name(&self, name: &str) -> Result<SchemaObjectRef> {
                let state = self.read_state()?;
                state
                    .registry
                    .find(ObjectKind::$kind, name)
                    .context(error::$not_found { name })
            }
        )*
    };
}

impl Schema {
    pub fn new(id: SchemaId, name: String, owner: Arc<User>, system: bool) -> Self {
        Self {
            id,
            name,
            system,
            state: RwLock::new(SchemaState {
                owner: Some(owner),
                registry: Registry::new(),
                pending: PendingNames::new(),
                valid: true,
            }),
        }
    }

    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_system(&self) -> bool {
        self.system
    }

    pub fn owner(&self) -> Option<Arc<User>> {
        self.state.read().ok()?.owner.clone()
    }

    pub fn can_drop(&self) -> bool {
        self.name != SCHEMA_INFORMATION && self.name != SCHEMA_MAIN
    }

    pub fn create_sql(&self) -> Option<String> {
        if self.system {
            return None;
        }

        let state = self.state.read().ok()?;
        let owner = state.owner.as_ref()?;

        Some(format!(
            "CREATE SCHEMA {} AUTHORIZATION {}",
            quote_identifier(&self.name),
            owner.sql_name()
        ))
    }

    pub fn drop_sql(&self) -> Option<String> {
        None
    }

    pub fn add(&self, obj: SchemaObjectRef) -> Result<()> {
        let mut state = self.write_state()?;

        if CHECK {
            ensure!(
                state.valid,
                error::InternalSnafu {
                    detail: "schema is invalidated",
                }
            );
            ensure!(
                obj.schema_id() == self.id,
                error::InternalSnafu {
                    detail: "wrong schema",
                }
            );
        }

        let kind = obj.kind();
        let name = obj.name();
        state.registry.add(kind, name.clone(), obj)?;
        state.pending.release(&name);

        debug!(schema = %self.name, kind = %kind, object = %name, "added schema object");
        Ok(())
    }

    pub fn rename(&self, obj: &SchemaObjectRef, new_name: &str) -> Result<()> {
        let mut state = self.write_state()?;

        if CHECK {
            ensure!(
                state.valid,
                error::InternalSnafu {
                    detail: "schema is invalidated",
                }
            );
        }

        let kind = obj.kind();
        let old_name = obj.name();
        state.registry.rename(kind, &old_name, new_name, obj.clone())?;
        obj.rename(new_name);
        state.pending.release(&old_name);
        state.pending.release(new_name);

        debug!(schema = %self.name, kind = %kind, from = %old_name, to = %new_name, "renamed schema object");
        Ok(())
    }

    pub fn remove(&self, obj: &SchemaObjectRef) -> Result<()> {
        let mut state = self.write_state()?;

        let name = obj.name();
        state.registry.remove(obj.kind(), &name)?;
        state.pending.release(&name);

        debug!(schema = %self.name, object = %name, "removed schema object");
        Ok(())
    }

    pub fn find_table_or_view(
        &self,
        session: Option<&dyn Session>,
        name: &str,
    ) -> Option<SchemaObjectRef> {
        let found = {
            let state = self.state.read().ok()?;
            state.registry.find(ObjectKind::TableOrView, name)
        };

        found.or_else(|| session.and_then(|session| session.find_local_temp_table(name)))
    }

    pub fn get_table_or_view(
        &self,
        session: Option<&dyn Session>,
        name: &str,
    ) -> Result<SchemaObjectRef> {
        self.find_table_or_view(session, name)
            .context(error::TableOrViewNotFoundSnafu { name })
    }

    find_methods! {
        find_index => Index,
        find_sequence => Sequence,
        find_trigger => Trigger,
        find_constraint => Constraint,
        find_constant => Constant,
    }

    get_methods! {
        get_index => Index, IndexNotFoundSnafu;
        get_sequence => Sequence, SequenceNotFoundSnafu;
        get_constraint => Constraint, ConstraintNotFoundSnafu;
        get_constant => Constant, ConstantNotFoundSnafu;
    }

    pub fn all(&self, kind: ObjectKind) -> Result<Vec<SchemaObjectRef>> {
        Ok(self.read_state()?.registry.all(kind))
    }

    pub fn unique_constraint_name(&self, obj: &dyn DbObject) -> Result<String> {
        self.unique_name(ObjectKind::Constraint, "CONSTRAINT_", obj)
    }

    pub fn unique_index_name(&self, obj: &dyn DbObject, prefix: &str) -> Result<String> {
        self.unique_name(ObjectKind::Index, prefix, obj)
    }

    fn unique_name(&self, kind: ObjectKind, prefix: &str, obj: &dyn DbObject) -> Result<String> {
        let mut state = self.write_state()?;

        if CHECK {
            ensure!(
                state.valid,
                error::InternalSnafu {
                    detail: "schema is invalidated",
                }
            );
        }

        let source = obj.name();
        let state = &mut *state;
        Ok(state.pending.generate(prefix, &source, state.registry.map(kind)))
    }

    /// Releases a reservation whose object never made it into the registry.
    pub fn free_unique_name(&self, name: &str) {
        if let Ok(mut state) = self.state.write() {
            state.pending.release(name);
        }
    }

    /// Drains the registries in the fixed kind order, one object at a time,
    /// through the owning catalog; then drops the schema's own metadata,
    /// clears the owner and invalidates the schema.
    pub fn remove_children_and_resources(
        &self,
        session: &dyn Session,
        database: &dyn DatabaseCatalog,
    ) -> Result<()> {
        if CHECK {
            ensure!(
                self.read_state()?.valid,
                error::InternalSnafu {
                    detail: "schema is invalidated",
                }
            );
        }

        for kind in REMOVE_ORDER {
            loop {
                // the catalog deregisters the object from this schema; holding
                // the state lock across the call would deadlock
                let (obj, before) = {
                    let state = self.read_state()?;
                    (state.registry.any(kind), state.registry.len(kind))
                };
                let obj = match obj {
                    Some(obj) => obj,
                    None => break,
                };

                database
                    .remove_schema_object(session, &obj)
                    .context(error::DatabaseSnafu)?;

                let after = self.read_state()?.registry.len(kind);
                ensure!(
                    after < before,
                    error::InternalSnafu {
                        detail: format!("removing a {} left the registry unchanged", kind),
                    }
                );
            }
        }

        database
            .remove_meta(session, self.id)
            .context(error::DatabaseSnafu)?;

        let mut state = self.write_state()?;
        state.owner = None;
        state.valid = false;

        debug!(schema = %self.name, "schema contents removed");
        Ok(())
    }

    pub fn create_table(&self, args: CreateTableArgs) -> Arc<TableData> {
        Arc::new(TableData::new(self.id, args))
    }

    pub fn create_table_link(&self, args: CreateTableLinkArgs) -> Arc<TableLink> {
        Arc::new(TableLink::new(self.id, args))
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, SchemaState>> {
        self.state.read().map_err(|_| {
            error::InternalSnafu {
                detail: "schema lock poisoned",
            }
            .build()
        })
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, SchemaState>> {
        self.state.write().map_err(|_| {
            error::InternalSnafu {
                detail: "schema lock poisoned",
            }
            .build()
        })
    }
}
