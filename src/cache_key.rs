use sha2::{Digest, Sha256};

use crate::bbox::BBox;

const KEY_LEN: usize = 32;

/// Identifies a cached validation result, either by area or by an arbitrary name.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheKey {
    BBox(BBox),
    Custom(String),
}

impl CacheKey {
    /// Fixed-length hex identifier of this key for results read from `source`. Boxes that agree
    /// to 4 decimal places share a key; the same box over another dump does not.
    pub fn digest(&self, source: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.canonical().as_bytes());
        let hash = hasher.finalize();
        let mut hex: String = hash.iter().map(|b| format!("{:02x}", b)).collect();
        hex.truncate(KEY_LEN);
        hex
    }

    fn canonical(&self) -> String {
        match self {
            CacheKey::BBox(bbox) => {
                let [a, b, c, d] = bbox.as_array().map(round4);
                format!("restrictions:({a:?}, {b:?}, {c:?}, {d:?})")
            }
            CacheKey::Custom(name) => format!("restrictions:{name}"),
        }
    }
}

/// Rounds through the shortest decimal form so ties follow the decimal digits, not the
/// binary product of a multiply.
fn round4(value: f64) -> f64 {
    format!("{value:.4}").parse().unwrap_or(value)
}
