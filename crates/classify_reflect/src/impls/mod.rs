//! [`Classify`](crate::Classify) for standard types, and the static cells
//! used to implement [`Typed`](crate::info::Typed).
//!
//! | Type | Kind |
//! |------|------|
//! | `bool`, `char`, integers, floats, `String` | leaf |
//! | `Option<T>` | nullable |
//! | `Vec<T>`, `VecDeque<T>`, `BTreeSet<T>`, `HashSet<T>` | list |
//! | `[T; N]` | array |
//! | `BTreeMap<K, V>`, `HashMap<K, V>` | map |
//! | `Arc<T>` | shared |
//! | `Box<dyn Base>` | polymorphic, see [`PolyBase`](crate::registry::PolyBase) |

use alloc::string::String;

// -----------------------------------------------------------------------------
// Modules

mod array;
mod boxed;
mod cell;
mod list;
mod map;
mod option;
mod primitives;
mod shared;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeCell, GenericTypeInfoCell, GenericTypePathCell};
pub use cell::{NonGenericTypeCell, NonGenericTypeInfoCell};

/// Concatenates string slices, for building generic type paths.
///
/// # Example
///
/// ```
/// use classify_reflect::impls::concat;
///
/// assert_eq!(concat(&["Vec<", "u8", ">"]), "Vec<u8>");
/// ```
pub fn concat(parts: &[&str]) -> String {
    let mut out = String::with_capacity(parts.iter().map(|part| part.len()).sum());
    parts.iter().for_each(|part| out.push_str(part));
    out
}
