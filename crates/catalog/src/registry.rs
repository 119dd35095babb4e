use {
    crate::{error, error::Result, CHECK},
    def::{ObjectKind, SchemaObjectRef},
    rustc_hash::FxHashMap,
    snafu::prelude::*,
};

/// Per-kind exact-name lookup: one map per object kind, selected by the kind
/// tag.
pub(crate) struct Registry {
    tables_and_views: FxHashMap<String, SchemaObjectRef>,
    indexes: FxHashMap<String, SchemaObjectRef>,
    sequences: FxHashMap<String, SchemaObjectRef>,
    triggers: FxHashMap<String, SchemaObjectRef>,
    constraints: FxHashMap<String, SchemaObjectRef>,
    constants: FxHashMap<String, SchemaObjectRef>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            tables_and_views: FxHashMap::default(),
            indexes: FxHashMap::default(),
            sequences: FxHashMap::default(),
            triggers: FxHashMap::default(),
            constraints: FxHashMap::default(),
            constants: FxHashMap::default(),
        }
    }

    pub fn map(&self, kind: ObjectKind) -> &FxHashMap<String, SchemaObjectRef> {
        match kind {
            ObjectKind::TableOrView => &self.tables_and_views,
            ObjectKind::Index => &self.indexes,
            ObjectKind::Sequence => &self.sequences,
            ObjectKind::Trigger => &self.triggers,
            ObjectKind::Constraint => &self.constraints,
            ObjectKind::Constant => &self.constants,
        }
    }

    fn map_mut(&mut self, kind: ObjectKind) -> &mut FxHashMap<String, SchemaObjectRef> {
        match kind {
            ObjectKind::TableOrView => &mut self.tables_and_views,
            ObjectKind::Index => &mut self.indexes,
            ObjectKind::Sequence => &mut self.sequences,
            ObjectKind::Trigger => &mut self.triggers,
            ObjectKind::Constraint => &mut self.constraints,
            ObjectKind::Constant => &mut self.constants,
        }
    }

    pub fn add(&mut self, kind: ObjectKind, name: String, obj: SchemaObjectRef) -> Result<()> {
        if CHECK && self.map(kind).contains_key(name.as_str()) {
            return error::DuplicateNameSnafu { name }.fail();
        }

        self.map_mut(kind).insert(name, obj);
        Ok(())
    }

    pub fn find(&self, kind: ObjectKind, name: &str) -> Option<SchemaObjectRef> {
        self.map(kind).get(name).cloned()
    }

    pub fn remove(&mut self, kind: ObjectKind, name: &str) -> Result<()> {
        if CHECK && !self.map(kind).contains_key(name) {
            return error::InternalSnafu {
                detail: format!("not found: {}", name),
            }
            .fail();
        }

        self.map_mut(kind).remove(name);
        Ok(())
    }

    /// Moves an entry as one logical step: no observable state holds both
    /// names or neither name.
    pub fn rename(
        &mut self,
        kind: ObjectKind,
        old_name: &str,
        new_name: &str,
        obj: SchemaObjectRef,
    ) -> Result<()> {
        if CHECK {
            ensure!(
                self.map(kind).contains_key(old_name),
                error::InternalSnafu {
                    detail: format!("not found: {}", old_name),
                }
            );
            ensure!(
                old_name != new_name && !self.map(kind).contains_key(new_name),
                error::DuplicateNameSnafu { name: new_name }
            );
        }

        self.map_mut(kind).remove(old_name);
        self.map_mut(kind).insert(new_name.to_string(), obj);
        Ok(())
    }

    pub fn all(&self, kind: ObjectKind) -> Vec<SchemaObjectRef> {
        self.map(kind).values().cloned().collect()
    }

    pub fn any(&self, kind: ObjectKind) -> Option<SchemaObjectRef> {
        self.map(kind).values().next().cloned()
    }

    pub fn len(&self, kind: ObjectKind) -> usize {
        self.map(kind).len()
    }
}
