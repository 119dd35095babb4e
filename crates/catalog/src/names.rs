use {
    core::hash::{Hash, Hasher},
    def::SchemaObjectRef,
    rustc_hash::{FxHashMap, FxHashSet, FxHasher},
};

/// Names handed out by the generator but not yet committed into a registry.
/// Reservation must happen inside the same critical section as the free-slot
/// search.
pub(crate) struct PendingNames {
    names: FxHashSet<String>,
}

impl PendingNames {
    pub fn new() -> Self {
        Self {
            names: FxHashSet::default(),
        }
    }

    pub fn release(&mut self, name: &str) {
        self.names.remove(name);
    }

    /// Picks the shortest free `prefix + hex-prefix-of-hash` candidate, falling
    /// back to `prefix + hash + "_" + i` when every hex prefix is taken, and
    /// reserves the winner before returning it. The reservation is not released
    /// automatically: a successful add (or an explicit release) frees it.
    pub fn generate(
        &mut self,
        prefix: &str,
        source_name: &str,
        committed: &FxHashMap<String, SchemaObjectRef>,
    ) -> String {
        let hash = name_hash(source_name);
        let mut name = None;

        for i in 1..hash.len() {
            let candidate = format!("{}{}", prefix, &hash[..i]);
            if !committed.contains_key(candidate.as_str()) && !self.names.contains(&candidate) {
                name = Some(candidate);
                break;
            }
        }

        let name = match name {
            Some(name) => name,
            None => {
                let prefix = format!("{}{}_", prefix, hash);
                let mut i = 0;
                loop {
                    let candidate = format!("{}{}", prefix, i);
                    if !committed.contains_key(candidate.as_str())
                        && !self.names.contains(&candidate)
                    {
                        break candidate;
                    }
                    i += 1;
                }
            }
        };

        self.names.insert(name.clone());
        name
    }
}

pub(crate) fn name_hash(name: &str) -> String {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    format!("{:X}", hasher.finish())
}
