//! tally-storage-json
//!
//! The durable slot: the whole transaction collection serialized as one JSON
//! array, either in a file or held in process memory.

pub mod codec;
pub mod file;
pub mod memory;

pub use codec::{decode_transactions, encode_transactions};
pub use file::JsonSlotStorage;
pub use memory::MemorySlotStorage;
