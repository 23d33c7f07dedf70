//! Deterministic feature-hashing embedder, used when no embedding service is configured.

use async_trait::async_trait;
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

use super::{EmbedError, Embedder};

// Changing either key changes every vector this embedder produces.
const HASH_KEY_0: u64 = 0x5eed_0f5c_0e1e_7a11;
const HASH_KEY_1: u64 = 0x0b5e_55ed_c0ff_ee42;

pub const DEFAULT_DIMENSION: usize = 256;

/// Bag-of-words embedder: each token is hashed to a signed bucket and the
/// vector is L2-normalized.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in tokenize(text) {
            let hash = hash_token(&token);
            let index = (hash % self.dimension as u64) as usize;
            // The top bit picks the sign so colliding tokens partly cancel out.
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[index] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        Ok(self.embed_text(text))
    }
}

/// Lowercased alphanumeric tokens; `+` and `#` stay attached so C++ and C# survive.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

fn hash_token(token: &str) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(HASH_KEY_0, HASH_KEY_1);
    token.hash(&mut hasher);
    hasher.finish()
}
