use event_approval_api::HistoryEntry;
use serde::Serialize;
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Hashes serializable data into an i64 using CBOR serialization and XxHash64.
///
/// This provides a stable hash across different runs and systems by:
/// - Serializing the data to CBOR format (deterministic binary representation)
/// - Using XxHash64 with a fixed seed (0) for consistent hashing
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut hasher = XxHash64::with_seed(0);
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}

/// Links `entry` to its predecessor and stamps its own hash.
pub fn seal_history_entry(entry: &mut HistoryEntry, antecedent_hash: i64) -> Result<(), String> {
    entry.antecedent_hash = antecedent_hash;
    entry.hash = 0;
    entry.hash = hash_as_i64(entry)?;
    Ok(())
}

/// Checks that `entries` (oldest first, one event) form an unbroken hash chain.
pub fn verify_history_chain(entries: &[HistoryEntry]) -> bool {
    let mut antecedent = 0;
    for entry in entries {
        if entry.antecedent_hash != antecedent {
            return false;
        }
        let mut unsealed = entry.clone();
        unsealed.hash = 0;
        match hash_as_i64(&unsealed) {
            Ok(hash) if hash == entry.hash => antecedent = entry.hash,
            _ => return false,
        }
    }
    true
}
