//! The decoded structure: an insertion-ordered collection of fields.

use core::slice;

use indexmap::{IndexMap, map::Entry};

use crate::field::Field;

/// The value slot for one field name.
///
/// A name holds a single field until a second occurrence of the same name
/// arrives, at which point the slot is promoted to an ordered sequence.
/// `Many` always holds at least two fields, in decode order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldSlot {
    /// The only occurrence of this name so far.
    One(Field),
    /// Two or more occurrences, in decode order.
    Many(Vec<Field>),
}

impl FieldSlot {
    /// The first field decoded under this name.
    #[must_use]
    pub fn first(&self) -> &Field {
        match self {
            Self::One(field) => field,
            Self::Many(fields) => &fields[0],
        }
    }

    /// Iterates the fields under this name, in decode order.
    pub fn iter(&self) -> slice::Iter<'_, Field> {
        match self {
            Self::One(field) => slice::from_ref(field).iter(),
            Self::Many(fields) => fields.iter(),
        }
    }

    fn push(&mut self, field: Field) {
        match self {
            Self::One(_) => {
                let Self::One(first) = core::mem::replace(self, Self::Many(Vec::new())) else {
                    unreachable!()
                };
                *self = Self::Many(vec![first, field]);
            }
            Self::Many(fields) => fields.push(field),
        }
    }
}

impl<'a> IntoIterator for &'a FieldSlot {
    type Item = &'a Field;
    type IntoIter = slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The decoded collection of all fields from one complete record.
///
/// Names iterate in first-seen order; duplicate names collect into a
/// [`FieldSlot::Many`] in decode order rather than overwriting.
///
/// # Examples
///
/// ```
/// use fieldmodem::{FieldSlot, decode_record};
///
/// let record = decode_record(b":i a 1\n:i a 2\n").unwrap();
/// let FieldSlot::Many(fields) = record.get("a").unwrap() else {
///     panic!("expected promotion");
/// };
/// assert_eq!(fields.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    entries: IndexMap<String, FieldSlot>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one decoded field into the record.
    ///
    /// The first occurrence of a name occupies the slot alone; the second
    /// promotes it to a sequence; later ones append.
    pub fn merge(&mut self, field: Field) {
        match self.entries.entry(field.name().to_owned()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(field),
            Entry::Vacant(entry) => {
                entry.insert(FieldSlot::One(field));
            }
        }
    }

    /// Looks up the slot for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSlot> {
        self.entries.get(name)
    }

    /// The number of distinct field names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, slot)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSlot)> {
        self.entries.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    /// Iterates every field, flattening duplicate-name slots.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.entries.values().flat_map(FieldSlot::iter)
    }
}
