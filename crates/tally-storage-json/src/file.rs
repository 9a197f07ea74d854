use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use tally_core::{storage::LedgerStorage, CoreError};
use tally_domain::Transaction;

use crate::codec::{decode_transactions, encode_transactions};

const SLOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Keeps the slot in a single `<slot>.json` file under a data directory.
#[derive(Debug, Clone)]
pub struct JsonSlotStorage {
    path: PathBuf,
}

impl JsonSlotStorage {
    /// Creates `dir` if needed and targets the file for `slot` inside it.
    pub fn new(dir: PathBuf, slot: &str) -> Result<Self, CoreError> {
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.{}", canonical_name(slot), SLOT_EXTENSION));
        Ok(Self { path })
    }

    /// Uses `path` verbatim as the slot file.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStorage for JsonSlotStorage {
    fn read_ledger(&self) -> Result<Option<Vec<Transaction>>, CoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        decode_transactions(&data).map(Some)
    }

    fn write_ledger(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = encode_transactions(transactions)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), count = transactions.len(), "slot written");
        Ok(())
    }

    fn slot_label(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps ASCII letters and digits, folds everything else to `_`.
fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
