//! Buffer snapshot for deterministic state comparison

use serde::{Deserialize, Serialize};

/// Complete observable buffer state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSnapshot {
    pub cursor: usize,
    pub len: usize,
    pub capacity: usize,
    pub remaining_capacity: usize,
    pub text: String,
    pub transcript_len: usize,
}

impl BufferSnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update(self.cursor.to_le_bytes());
        hasher.update(self.len.to_le_bytes());
        hasher.update(self.capacity.to_le_bytes());
        hasher.update(self.remaining_capacity.to_le_bytes());
        hasher.update(self.text.as_bytes());
        hasher.update(self.transcript_len.to_le_bytes());

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }
}
