//! Record descriptors and the `record!` declaration macro

use super::Settable;

/// Tag value that keeps a field out of configuration entirely.
pub const SKIP_TAG: &str = "-";

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Declared field name. Also used for error and overlay paths.
    pub name: &'static str,
    /// Key override; `"-"` skips the field.
    pub tag: Option<&'static str>,
    /// Embedded record whose fields may be flattened into the parent.
    pub embedded: bool,
}

impl FieldSpec {
    /// Key to look up in the source mapping, or `None` for skipped fields.
    pub fn lookup_key(&self) -> Option<&'static str> {
        match self.tag {
            Some(SKIP_TAG) => None,
            Some(tag) if !tag.is_empty() => Some(tag),
            _ => Some(self.name),
        }
    }
}

/// A record: a fixed list of named fields.
///
/// `fields()` and `fields_mut()` must list the fields in the same order.
pub trait RecordSlot {
    fn fields(&self) -> &'static [FieldSpec];

    fn fields_mut(&mut self) -> Vec<&mut dyn Settable>;
}

/// Declare how a struct is populated from configuration.
///
/// Each field may carry a key override (`port = "listen_port"`, or `"-"` to
/// skip it) and the `(embedded)` marker for records that should be flattened
/// into the parent when `merge_anonymous` is enabled.
///
/// ```
/// #[derive(Debug, Default, Clone)]
/// struct Server {
///     host: String,
///     port: u16,
///     secret: String,
/// }
///
/// eagle::record!(Server {
///     host,
///     port = "listen_port",
///     secret = "-",
/// });
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ident { $( $field:ident $( = $tag:literal )? $( ( $flag:ident ) )? ),* $(,)? }) => {
        impl $crate::slot::RecordSlot for $ty {
            fn fields(&self) -> &'static [$crate::slot::FieldSpec] {
                const FIELDS: &[$crate::slot::FieldSpec] = &[
                    $(
                        $crate::slot::FieldSpec {
                            name: stringify!($field),
                            tag: $crate::__record_tag!($($tag)?),
                            embedded: $crate::__record_flag!($($flag)?),
                        },
                    )*
                ];
                FIELDS
            }

            fn fields_mut(&mut self) -> Vec<&mut dyn $crate::slot::Settable> {
                vec![$( &mut self.$field as &mut dyn $crate::slot::Settable ),*]
            }
        }

        impl $crate::slot::Settable for $ty {
            fn slot(&mut self) -> $crate::slot::Slot<'_> {
                $crate::slot::Slot::Record(self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_tag {
    () => {
        None
    };
    ($tag:literal) => {
        Some($tag)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_flag {
    () => {
        false
    };
    (embedded) => {
        true
    };
}

#[cfg(test)]
mod tests {
    use super::{FieldSpec, RecordSlot};

    #[derive(Debug, Default, Clone)]
    struct Sample {
        plain: String,
        renamed: i32,
        hidden: bool,
        empty_tag: bool,
    }

    crate::record!(Sample {
        plain,
        renamed = "other",
        hidden = "-",
        empty_tag = "",
    });

    #[test]
    fn descriptor_follows_declaration_order() {
        let sample = Sample::default();
        let names: Vec<_> = sample.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["plain", "renamed", "hidden", "empty_tag"]);
    }

    #[test]
    fn lookup_key_resolution() {
        let fields = Sample::default().fields();
        assert_eq!(fields[0].lookup_key(), Some("plain"));
        assert_eq!(fields[1].lookup_key(), Some("other"));
        assert_eq!(fields[2].lookup_key(), None);
        assert_eq!(fields[3].lookup_key(), Some("empty_tag"));
    }

    #[test]
    fn embedded_flag_does_not_change_key() {
        let spec = FieldSpec { name: "base", tag: None, embedded: true };
        assert_eq!(spec.lookup_key(), Some("base"));
    }

    #[test]
    fn fields_mut_matches_descriptor() {
        let mut sample = Sample::default();
        let expected = sample.fields().len();
        let slots = sample.fields_mut();
        assert_eq!(slots.len(), expected);
    }
}
