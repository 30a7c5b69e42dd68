//! Borrowed views of caller-owned tree data.
//!
//! Rust has no runtime reflection, so tree data is made visible through the
//! [`Reflect`] trait, which turns a value into a [`Value`]: text, a list, a
//! record (a struct with a [`Shape`](crate::Shape)), a mapping with
//! well-known keys, or something the visitor cannot use.
//!
//! Records are normally implemented with `#[derive(AsciiTree)]`; mappings
//! come for free for `BTreeMap<String, _>`, `HashMap<String, _>` and
//! `serde_json` objects.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use crate::shape::Shape;

/// A borrowed view of a piece of tree data.
///
/// Values are produced by [`Reflect::reflect`] and consumed by
/// [`Visitor`](crate::Visitor)s. They never own the data they describe.
#[derive(Clone)]
pub enum Value<'a> {
    /// Text, such as a label or a property.
    Text(&'a str),
    /// An ordered sequence, such as children, properties, or roots.
    List(Vec<Value<'a>>),
    /// A struct-like record whose members are located through its shape.
    Record(&'a dyn Record),
    /// A mapping probed with the well-known keys.
    Mapping(&'a dyn Mapping),
    /// An empty optional value.
    Absent,
    /// Anything else, carrying its type name for diagnostics.
    Other(&'static str),
}

impl<'a> Value<'a> {
    /// Returns the name of the runtime type behind this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "str",
            Value::List(_) => "sequence",
            Value::Record(record) => record.shape().type_name,
            Value::Mapping(mapping) => mapping.type_name(),
            Value::Absent => "None",
            Value::Other(name) => *name,
        }
    }

    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Value::Text(text) => Some(*text),
            _ => None,
        }
    }

    /// Consumes the value, returning its items if it is a list.
    pub fn into_list(self) -> Option<Vec<Value<'a>>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Record(_) | Value::Mapping(_) | Value::Other(_) => {
                write!(f, "{}", self.type_name())
            }
            Value::Absent => f.write_str("Absent"),
        }
    }
}

/// Conversion of caller data into a [`Value`] view.
pub trait Reflect {
    /// Returns a borrowed view of `self`.
    fn reflect(&self) -> Value<'_>;
}

/// A struct-like tree node with members located by declaration index.
///
/// Implemented by `#[derive(AsciiTree)]`. Hand-written implementations must
/// keep [`field`](Record::field) consistent with the shape: index `i` returns
/// the value of `shape().fields[i]`.
pub trait Record {
    /// Returns the static description of this record's members.
    fn shape(&self) -> &'static Shape;

    /// Returns the member at `index`, or [`Value::Absent`] when the member
    /// is not readable.
    fn field(&self, index: usize) -> Value<'_>;
}

/// A string-keyed mapping probed with the well-known role keys.
pub trait Mapping {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Value<'_>>;

    /// Returns the name of the concrete mapping type.
    fn type_name(&self) -> &'static str;
}

impl Reflect for str {
    fn reflect(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl Reflect for String {
    fn reflect(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl Reflect for Cow<'_, str> {
    fn reflect(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Value<'_> {
        match self {
            Some(value) => value.reflect(),
            None => Value::Absent,
        }
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> Value<'_> {
        Value::List(self.iter().map(Reflect::reflect).collect())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Value<'_> {
        self.as_slice().reflect()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Value<'_> {
        self.as_slice().reflect()
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn reflect(&self) -> Value<'_> {
        Value::List(self.iter().map(Reflect::reflect).collect())
    }
}

impl<V: Reflect> Mapping for BTreeMap<String, V> {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        BTreeMap::get(self, key).map(Reflect::reflect)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<V: Reflect> Reflect for BTreeMap<String, V> {
    fn reflect(&self) -> Value<'_> {
        Value::Mapping(self)
    }
}

impl<V: Reflect, S: BuildHasher> Mapping for HashMap<String, V, S> {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        HashMap::get(self, key).map(Reflect::reflect)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<V: Reflect, S: BuildHasher> Reflect for HashMap<String, V, S> {
    fn reflect(&self) -> Value<'_> {
        Value::Mapping(self)
    }
}

impl Mapping for serde_json::Map<String, serde_json::Value> {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        serde_json::Map::get(self, key).map(Reflect::reflect)
    }

    fn type_name(&self) -> &'static str {
        "serde_json::Map"
    }
}

impl Reflect for serde_json::Map<String, serde_json::Value> {
    fn reflect(&self) -> Value<'_> {
        Value::Mapping(self)
    }
}

impl Reflect for serde_json::Value {
    fn reflect(&self) -> Value<'_> {
        match self {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(_) => Value::Other("bool"),
            serde_json::Value::Number(_) => Value::Other("number"),
            serde_json::Value::String(text) => Value::Text(text),
            serde_json::Value::Array(items) => items.reflect(),
            serde_json::Value::Object(map) => Value::Mapping(map),
        }
    }
}

macro_rules! reflect_as_other {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Value<'_> {
                    Value::Other(stringify!($ty))
                }
            }
        )*
    };
}

reflect_as_other!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, ()
);
