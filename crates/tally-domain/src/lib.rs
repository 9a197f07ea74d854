//! tally-domain
//!
//! Pure domain models (Transaction, sale drafts, week ranges and buckets).
//! No I/O, no storage. Only data types.

pub mod common;
pub mod transaction;
pub mod week;

pub use common::*;
pub use transaction::*;
pub use week::*;
