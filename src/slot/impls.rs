//! `Settable` implementations for standard library types

use super::{
    FloatSlot, IntegerSlot, MappingSlot, OptionalSlot, SequenceSlot, Settable, Slot,
};
use crate::value::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::marker::PhantomData;
use std::sync::mpsc::{Sender, SyncSender};

macro_rules! integer_slot {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntegerSlot for $ty {
                fn kind(&self) -> &'static str {
                    stringify!($ty)
                }

                fn accepts(&self, value: i128) -> bool {
                    <$ty>::try_from(value).is_ok()
                }

                fn store(&mut self, value: i128) {
                    if let Ok(value) = <$ty>::try_from(value) {
                        *self = value;
                    }
                }
            }

            impl Settable for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Integer(self)
                }
            }
        )*
    };
}

integer_slot!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FloatSlot for f64 {
    fn kind(&self) -> &'static str {
        "f64"
    }

    fn store(&mut self, value: f64) {
        *self = value;
    }
}

impl FloatSlot for f32 {
    fn kind(&self) -> &'static str {
        "f32"
    }

    fn store(&mut self, value: f64) {
        *self = value as f32;
    }
}

impl Settable for f64 {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Float(self)
    }
}

impl Settable for f32 {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Float(self)
    }
}

impl Settable for String {
    fn slot(&mut self) -> Slot<'_> {
        Slot::String(self)
    }
}

impl Settable for bool {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Bool(self)
    }
}

impl Settable for Value {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Dynamic(self)
    }
}

impl<T: Settable + Default> OptionalSlot for Option<T> {
    fn get_or_default(&mut self) -> &mut dyn Settable {
        self.get_or_insert_with(T::default)
    }
}

impl<T: Settable + Default> Settable for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Optional(self)
    }
}

impl<T: Settable + ?Sized> Settable for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        (**self).slot()
    }
}

impl<T: Settable + Default + 'static> SequenceSlot for Vec<T> {
    fn reset(&mut self, len: usize) {
        self.clear();
        self.resize_with(len, T::default);
    }

    fn scratch(&self, len: usize) -> Box<dyn SequenceSlot> {
        let mut scratch: Vec<T> = Vec::with_capacity(len);
        scratch.reset(len);
        Box::new(scratch)
    }

    fn elements_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn Settable> + '_> {
        Box::new(self.iter_mut().map(|element| element as &mut dyn Settable))
    }
}

impl<T: Settable + Default + 'static> Settable for Vec<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self)
    }
}

impl<V: Settable + Default, S: BuildHasher> MappingSlot for HashMap<String, V, S> {
    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn entry(&mut self, key: String) -> &mut dyn Settable {
        HashMap::entry(self, key).or_default()
    }
}

impl<V: Settable + Default, S: BuildHasher> Settable for HashMap<String, V, S> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Mapping(self)
    }
}

impl<V: Settable + Default> MappingSlot for BTreeMap<String, V> {
    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    fn entry(&mut self, key: String) -> &mut dyn Settable {
        BTreeMap::entry(self, key).or_default()
    }
}

impl<V: Settable + Default> Settable for BTreeMap<String, V> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Mapping(self)
    }
}

impl<T: ?Sized> Settable for PhantomData<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::ReadOnly
    }
}

impl<T> Settable for Sender<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("channel")
    }
}

impl<T> Settable for SyncSender<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("channel")
    }
}

impl<R> Settable for fn() -> R {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("fn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_range_checks() {
        let small: u8 = 0;
        assert!(small.accepts(255));
        assert!(!small.accepts(256));
        assert!(!small.accepts(-1));
        assert_eq!(small.kind(), "u8");

        let wide: i64 = 0;
        assert!(wide.accepts(i128::from(i64::MIN)));
        assert!(!wide.accepts(i128::from(u64::MAX)));
    }

    #[test]
    fn vec_reset_and_scratch() {
        let mut items = vec![7u32, 8, 9];
        items.reset(2);
        assert_eq!(items, vec![0, 0]);

        let mut scratch = items.scratch(4);
        assert_eq!(scratch.elements_mut().count(), 4);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn option_allocates_default() {
        let mut port: Option<u16> = None;
        let _ = port.get_or_default();
        assert_eq!(port, Some(0));
    }

    #[test]
    fn map_entry_inserts_default() {
        let mut map: HashMap<String, i32> = HashMap::new();
        let _ = MappingSlot::entry(&mut map, "a".to_string());
        assert_eq!(map.get("a"), Some(&0));
    }

    #[test]
    fn boxed_value_delegates() {
        let mut boxed = Box::new(String::new());
        assert!(matches!(boxed.slot(), Slot::String(_)));
        let mut marker: PhantomData<u8> = PhantomData;
        assert!(matches!(marker.slot(), Slot::ReadOnly));
    }
}
