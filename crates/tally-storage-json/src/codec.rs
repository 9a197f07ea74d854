use tally_core::CoreError;
use tally_domain::Transaction;

/// Serializes the collection as a JSON array of transaction records.
pub fn encode_transactions(transactions: &[Transaction]) -> Result<String, CoreError> {
    serde_json::to_string_pretty(transactions).map_err(|err| CoreError::Serde(err.to_string()))
}

pub fn decode_transactions(payload: &str) -> Result<Vec<Transaction>, CoreError> {
    serde_json::from_str(payload).map_err(|err| CoreError::Serde(err.to_string()))
}
