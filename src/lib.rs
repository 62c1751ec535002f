//! Sorted map with a structure of arrays layout.
//!
//! `SoaMap` keeps its keys and its values in two separate, parallel sequences instead
//! of one sequence of `(K, V)` pairs. Key scans (search, bulk lookup) only touch the
//! key buffer, value scans only touch the value buffer.
//!
//! Since no `(K, V)` exists in memory, positional access goes through `Cursor`
//! (a `(map, position)` value) and `Pair`/`PairMut` (views resolving `key()` and
//! `value()` on demand).

mod compare;
pub use compare::*;

mod error;
pub use error::*;

pub mod search;

mod sequence;
pub use sequence::*;

mod map;
pub use map::*;

mod pair;
pub use pair::*;

mod cursor;
pub use cursor::*;

mod iterator;
pub use iterator::*;
