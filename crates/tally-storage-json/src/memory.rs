use std::sync::Mutex;

use tally_core::{storage::LedgerStorage, CoreError};
use tally_domain::Transaction;

use crate::codec::{decode_transactions, encode_transactions};

/// Slot held in process memory, still round-tripping through the JSON payload.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    payload: Mutex<Option<String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `payload` already in the slot, valid or not.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }

    /// Raw contents of the slot.
    pub fn payload(&self) -> Option<String> {
        self.payload.lock().ok().and_then(|slot| slot.clone())
    }
}

impl LedgerStorage for MemorySlotStorage {
    fn read_ledger(&self) -> Result<Option<Vec<Transaction>>, CoreError> {
        let slot = self
            .payload
            .lock()
            .map_err(|_| CoreError::Storage("memory slot lock poisoned".into()))?;
        slot.as_deref().map(decode_transactions).transpose()
    }

    fn write_ledger(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        let json = encode_transactions(transactions)?;
        let mut slot = self
            .payload
            .lock()
            .map_err(|_| CoreError::Storage("memory slot lock poisoned".into()))?;
        *slot = Some(json);
        Ok(())
    }

    fn slot_label(&self) -> String {
        "memory".into()
    }
}
