//! Structural mapper: populate typed destinations from decoded trees
//!
//! The mapper walks a destination (through [`Settable`]) and a [`Value`] node
//! side by side. Several trees can be layered onto the same destination with
//! [`map_layers`]; the first tree to assign a path wins and later trees only
//! fill what is still unassigned.

use crate::slot::{MappingSlot, RecordSlot, SequenceSlot, Settable, Slot};
use crate::value::Value;
use std::collections::HashSet;

mod error;
mod path;

pub use error::MapError;
pub use path::FieldPath;

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Knobs consumed by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    /// Look up fields of `(embedded)` records directly in the parent mapping.
    pub merge_anonymous: bool,
    /// Maximum recursion depth before mapping fails.
    pub max_depth: usize,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self { merge_anonymous: false, max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Layer `entities` (highest priority first) onto `dst`.
///
/// All passes run against a copy of `dst` which replaces it only when every
/// pass succeeds. On error `dst` is left untouched and the first error is
/// returned; lower-priority entities are not visited.
pub fn map_layers<T>(dst: &mut T, entities: &[Value], options: &MapOptions) -> Result<(), MapError>
where
    T: Settable + Clone,
{
    let mut scratch = dst.clone();
    let mut mapper = Mapper::new(*options);
    for (index, entity) in entities.iter().enumerate() {
        tracing::debug!(entity = index, kind = entity.kind(), "mapping entity");
        mapper.map_entity(&mut scratch, entity)?;
    }
    *dst = scratch;
    Ok(())
}

/// Recursive tree-to-destination conversion.
///
/// A `Mapper` remembers every path assigned by the trees it has finished,
/// so feeding it several trees in turn through [`Mapper::map_entity`] gives
/// first-wins overlay semantics. Claims only shadow later trees: within one
/// tree, flattened fields that share a path are all written.
#[derive(Debug)]
pub struct Mapper {
    options: MapOptions,
    /// Paths assigned by earlier trees.
    assigned: HashSet<String>,
    /// Paths assigned by the tree being mapped.
    pending: HashSet<String>,
    depth: usize,
}

impl Mapper {
    pub fn new(options: MapOptions) -> Self {
        Self { options, assigned: HashSet::new(), pending: HashSet::new(), depth: 0 }
    }

    /// Map one whole tree onto `dst` from the root, then make its
    /// assignments binding for every later tree.
    pub fn map_entity(&mut self, dst: &mut dyn Settable, node: &Value) -> Result<(), MapError> {
        let result = self.map(dst, node, &FieldPath::root());
        self.assigned.extend(self.pending.drain());
        result
    }

    /// Populate `dst` from `node`. Null nodes leave `dst` untouched.
    pub fn map(
        &mut self,
        dst: &mut dyn Settable,
        node: &Value,
        path: &FieldPath,
    ) -> Result<(), MapError> {
        if node.is_null() {
            return Ok(());
        }
        if self.depth >= self.options.max_depth {
            return Err(MapError::too_deep(path, self.options.max_depth));
        }

        self.depth += 1;
        let result = self.dispatch(dst, node, path);
        self.depth -= 1;
        result
    }

    fn dispatch(
        &mut self,
        dst: &mut dyn Settable,
        node: &Value,
        path: &FieldPath,
    ) -> Result<(), MapError> {
        match dst.slot() {
            Slot::ReadOnly => Ok(()),
            Slot::Unsupported(kind) => Err(MapError::unsupported(path, kind)),
            Slot::Optional(inner) => self.map(inner.get_or_default(), node, path),
            Slot::Sequence(seq) => self.map_sequence(seq, node, path),
            Slot::Record(record) => self.map_record(record, node, path),
            Slot::Mapping(map) => self.map_mapping(map, node, path),
            Slot::Integer(int) => {
                let value = node
                    .as_integer()
                    .filter(|value| int.accepts(*value))
                    .ok_or_else(|| MapError::conversion(path, int.kind()))?;
                if self.claim(path) {
                    int.store(value);
                }
                Ok(())
            }
            Slot::Float(float) => {
                let value =
                    node.as_float().ok_or_else(|| MapError::conversion(path, float.kind()))?;
                if self.claim(path) {
                    float.store(value);
                }
                Ok(())
            }
            Slot::String(target) => {
                let value = node.as_str().ok_or_else(|| MapError::conversion(path, "string"))?;
                if self.claim(path) {
                    *target = value.to_string();
                }
                Ok(())
            }
            Slot::Bool(target) => {
                let value = node.as_bool().ok_or_else(|| MapError::conversion(path, "bool"))?;
                if self.claim(path) {
                    *target = value;
                }
                Ok(())
            }
            Slot::Dynamic(target) => {
                if self.claim(path) {
                    *target = node.clone();
                }
                Ok(())
            }
        }
    }

    /// Sequences are assigned whole. Once a path holds a sequence, later
    /// trees are still checked element by element, but into a scratch buffer.
    fn map_sequence(
        &mut self,
        seq: &mut dyn SequenceSlot,
        node: &Value,
        path: &FieldPath,
    ) -> Result<(), MapError> {
        let items = node.as_sequence().ok_or_else(|| MapError::conversion(path, "slice"))?;
        if self.claim(path) {
            seq.reset(items.len());
            self.map_elements(seq, items, path)
        } else {
            let mut scratch = seq.scratch(items.len());
            self.map_elements(scratch.as_mut(), items, path)
        }
    }

    fn map_elements(
        &mut self,
        seq: &mut dyn SequenceSlot,
        items: &[Value],
        path: &FieldPath,
    ) -> Result<(), MapError> {
        for (index, (element, item)) in seq.elements_mut().zip(items).enumerate() {
            self.map(element, item, &path.index(index))?;
        }
        Ok(())
    }

    fn map_record(
        &mut self,
        record: &mut dyn RecordSlot,
        node: &Value,
        path: &FieldPath,
    ) -> Result<(), MapError> {
        let mapping = node.as_mapping().ok_or_else(|| MapError::conversion(path, "struct"))?;
        let specs = record.fields();
        let fields = record.fields_mut();
        debug_assert_eq!(specs.len(), fields.len());

        for (spec, field) in specs.iter().zip(fields) {
            let Some(key) = spec.lookup_key() else {
                continue;
            };
            if spec.embedded && self.options.merge_anonymous {
                self.map(field, node, path)?;
            } else if let Some(child) = mapping.get(key) {
                self.map(field, child, &path.child(spec.name))?;
            }
        }
        Ok(())
    }

    /// The first tree to reach a mapping replaces its contents; later trees
    /// merge into it key by key.
    fn map_mapping(
        &mut self,
        map: &mut dyn MappingSlot,
        node: &Value,
        path: &FieldPath,
    ) -> Result<(), MapError> {
        let mapping = node.as_mapping().ok_or_else(|| MapError::conversion(path, "map"))?;
        if self.claim(path) {
            map.clear();
        }
        let mut seen = HashSet::with_capacity(mapping.len());
        for (key, value) in mapping.iter() {
            let key = key.key_string().ok_or_else(|| MapError::conversion(path, "map"))?;
            // `1` and `"1"` are distinct source keys but the same entry here.
            if !seen.insert(key.clone()) {
                return Err(MapError::conversion(path, "map"));
            }
            let child = path.child(&key);
            self.map(map.entry(key), value, &child)?;
        }
        Ok(())
    }

    /// Mark `path` as assigned by the current tree. Returns false when an
    /// earlier tree got there first.
    fn claim(&mut self, path: &FieldPath) -> bool {
        if self.assigned.contains(path.as_str()) {
            return false;
        }
        self.pending.insert(path.as_str().to_string());
        true
    }
}
