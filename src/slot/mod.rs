//! Destination shapes the mapper can write into
//!
//! A destination type describes itself through [`Settable::slot`], which hands
//! the mapper one variant of the closed [`Slot`] enumeration. Containers hand
//! out their children as `&mut dyn Settable` so the mapper can recurse without
//! knowing the concrete element types.

use crate::value::Value;

mod impls;
mod record;

pub use record::{FieldSpec, RecordSlot, SKIP_TAG};

/// Shape of a destination, borrowed mutably for the duration of one visit.
pub enum Slot<'a> {
    /// `Option<T>`: allocated on demand, then recursed into.
    Optional(&'a mut dyn OptionalSlot),
    Sequence(&'a mut dyn SequenceSlot),
    Mapping(&'a mut dyn MappingSlot),
    Record(&'a mut dyn RecordSlot),
    Integer(&'a mut dyn IntegerSlot),
    Float(&'a mut dyn FloatSlot),
    String(&'a mut String),
    Bool(&'a mut bool),
    /// Takes any node verbatim.
    Dynamic(&'a mut Value),
    /// Never written; visiting it is a no-op.
    ReadOnly,
    /// Cannot be populated from configuration. Carries the kind name.
    Unsupported(&'static str),
}

/// Implemented by every type that can be populated from a decoded tree.
///
/// Records get their implementation from [`record!`](crate::record).
pub trait Settable {
    fn slot(&mut self) -> Slot<'_>;
}

pub trait OptionalSlot {
    /// The pointee, allocating a default value first when empty.
    fn get_or_default(&mut self) -> &mut dyn Settable;
}

pub trait SequenceSlot {
    /// Replace the contents with `len` default elements.
    fn reset(&mut self, len: usize);

    /// A detached sequence of `len` default elements of the same type.
    fn scratch(&self, len: usize) -> Box<dyn SequenceSlot>;

    fn elements_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn Settable> + '_>;
}

pub trait MappingSlot {
    fn clear(&mut self);

    /// The value stored under `key`, inserting a default when missing.
    fn entry(&mut self, key: String) -> &mut dyn Settable;
}

pub trait IntegerSlot {
    /// Type name reported in conversion errors.
    fn kind(&self) -> &'static str;

    /// Whether `value` fits the destination's range.
    fn accepts(&self, value: i128) -> bool;

    fn store(&mut self, value: i128);
}

pub trait FloatSlot {
    fn kind(&self) -> &'static str;

    fn store(&mut self, value: f64);
}
