//! Worker port sets
//!
//! A node advertises the ports its worker processes may bind. Daemons report
//! them as whatever numeric type their wire format produced (integers of any
//! width, sometimes floats), so construction accepts any [`PortNumber`] and
//! truncates it to a [`Port`].
//!
//! # Coercion
//!
//! - Integers keep their low 32 bits (`as i32`)
//! - Floats are truncated toward zero, not rounded (`8000.9` becomes `8000`)
//! - Out-of-range floats saturate, NaN becomes `0`
//!
//! No bounds checking is applied: negative values and values above 65535
//! are kept as given.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// A single worker port
pub type Port = i32;

/// Numeric values that can be coerced to a [`Port`]
pub trait PortNumber {
    /// Integer component of this value
    fn to_port(&self) -> Port;
}

macro_rules! impl_port_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PortNumber for $ty {
                #[inline]
                fn to_port(&self) -> Port {
                    *self as Port
                }
            }
        )*
    };
}

impl_port_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: PortNumber + ?Sized> PortNumber for &T {
    #[inline]
    fn to_port(&self) -> Port {
        (**self).to_port()
    }
}

/// Read-only set of worker ports
///
/// Backed by a shared immutable set: cloning is cheap and no holder can
/// mutate the ports another holder sees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortSet(Arc<BTreeSet<Port>>);

impl PortSet {
    /// An empty port set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a port set from any sequence of numbers, truncating each value
    pub fn from_numbers<I>(numbers: I) -> Self
    where
        I: IntoIterator,
        I::Item: PortNumber,
    {
        numbers.into_iter().collect()
    }

    /// Whether `port` is available on this node
    pub fn contains(&self, port: Port) -> bool {
        self.0.contains(&port)
    }

    /// Number of distinct ports
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ports in ascending order
    pub fn iter(&self) -> impl Iterator<Item = Port> + '_ {
        self.0.iter().copied()
    }

    /// Borrow the underlying set
    pub fn as_set(&self) -> &BTreeSet<Port> {
        &self.0
    }
}

impl<P: PortNumber> FromIterator<P> for PortSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().map(|p| p.to_port()).collect()))
    }
}

impl<'a> IntoIterator for &'a PortSet {
    type Item = &'a Port;
    type IntoIter = std::collections::btree_set::Iter<'a, Port>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, port) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", port)?;
        }
        write!(f, "]")
    }
}
