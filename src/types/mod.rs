//! Type-string parsing, comparison and alignment.

mod align;
mod compare;
mod parse;

pub use align::{align_types, AlignStatus, AlignedDiff, AlignedRow};
pub use compare::{compare_types, normalize_type, Difference};
pub use parse::{parse_type, ObjectType, PropertyEntry, TypeNode};

pub(crate) use parse::parse_object;
