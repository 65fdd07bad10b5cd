//! Various unsorted geometrical and logical operators.

pub use self::periodic_box::PeriodicBox;
pub use self::sorted_pair::SortedPair;

pub mod hashmap;
mod periodic_box;
mod sorted_pair;
