use std::any::TypeId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use tracing::{debug, trace};

use crate::naming::{IdentityConvention, NamingConvention};
use crate::record::{FieldHasher, Handle, Layout, Record};

// ------------- FieldPath -------------
/// Field indices from the record down through embedded records to a scalar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<usize>);

impl FieldPath {
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}
impl From<Vec<usize>> for FieldPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}
impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "[{}]", parts.join("."))
    }
}

// ------------- Descriptor -------------
pub struct Descriptor {
    layout: &'static Layout,
    indirect: bool,
    index: HashMap<&'static str, FieldPath, FieldHasher>,
}

impl Descriptor {
    /// Unwraps every box around the handle's record and indexes its fields.
    pub fn new<H: Handle>() -> Self {
        let layout = <H::Record as Record>::layout();
        let index = build_index(layout);
        debug!(
            record = layout.name,
            indirections = H::INDIRECTIONS,
            fields = index.len(),
            "built descriptor"
        );
        Self {
            layout,
            indirect: H::INDIRECTIONS > 0,
            index,
        }
    }
    pub fn layout(&self) -> &'static Layout {
        self.layout
    }
    pub fn name(&self) -> &'static str {
        self.layout.name
    }
    /// Whether handles of this type come back boxed.
    pub fn indirect(&self) -> bool {
        self.indirect
    }
    /// Exact, case sensitive lookup of a declared (or promoted) field name.
    pub fn field(&self, name: &str) -> Option<&FieldPath> {
        self.index.get(name)
    }
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.index.keys().copied()
    }
    /// One outcome per column, in column order. `None` marks a column with no
    /// matching field.
    pub fn resolve<S: AsRef<str>>(
        &self,
        columns: &[S],
        convention: &dyn NamingConvention,
    ) -> Vec<Option<FieldPath>> {
        columns
            .iter()
            .map(|column| {
                let column = column.as_ref();
                let candidate = convention.convert(column, &IdentityConvention);
                let path = self.field(&candidate).cloned();
                match &path {
                    Some(path) => trace!(record = self.name(), column, field = %candidate, %path, "resolved"),
                    None => trace!(record = self.name(), column, field = %candidate, "unmatched"),
                }
                path
            })
            .collect()
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("record", &self.layout.name)
            .field("indirect", &self.indirect)
            .field("fields", &self.index.len())
            .finish()
    }
}

// Breadth first, so a shallower field shadows deeper ones of the same name.
// Two fields sharing a name at the shallowest depth cancel each other out.
fn build_index(layout: &'static Layout) -> HashMap<&'static str, FieldPath, FieldHasher> {
    let mut index = HashMap::<&'static str, FieldPath, FieldHasher>::default();
    let mut ambiguous = Vec::<&'static str>::new();
    let mut level: Vec<(&'static Layout, Vec<usize>)> = vec![(layout, Vec::new())];
    while !level.is_empty() {
        let mut found = HashMap::<&'static str, Option<FieldPath>, FieldHasher>::default();
        let mut deeper = Vec::new();
        for (layout, prefix) in level {
            for (position, field) in layout.fields.iter().enumerate() {
                let mut path = prefix.clone();
                path.push(position);
                if let Some(embedded) = field.embedded {
                    deeper.push((embedded(), path));
                    continue;
                }
                if index.contains_key(field.name) || ambiguous.contains(&field.name) {
                    continue;
                }
                match found.entry(field.name) {
                    Entry::Vacant(entry) => {
                        entry.insert(Some(FieldPath(path)));
                    }
                    Entry::Occupied(mut entry) => {
                        entry.insert(None);
                    }
                }
            }
        }
        for (name, path) in found {
            match path {
                Some(path) => {
                    index.insert(name, path);
                }
                None => {
                    debug!(record = layout.name, field = name, "ambiguous field name");
                    ambiguous.push(name);
                }
            }
        }
        level = deeper;
    }
    index
}

// ------------- Registry -------------
lazy_static! {
    static ref REGISTRY: Mutex<HashMap<TypeId, Arc<Descriptor>, FieldHasher>> =
        Mutex::new(HashMap::default());
}

/// The shared descriptor for `H`, built on first request.
pub fn of<H: Handle>() -> Arc<Descriptor> {
    let mut registry = match REGISTRY.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    Arc::clone(
        registry
            .entry(TypeId::of::<H>())
            .or_insert_with(|| Arc::new(Descriptor::new::<H>())),
    )
}
