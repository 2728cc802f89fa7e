//! SHA-256 digest of builder state for reproducibility checks

use crate::context_index::ContextIndex;
use crate::vocabulary::{Vocabulary, WordRepresentation};
use sha2::{Digest, Sha256};

/// Hex digest over the vocabulary and context index.
///
/// Independent of hash-map iteration order: words and context names are
/// hashed in sorted order, dimensions in index order.
pub fn state_fingerprint(vocabulary: &Vocabulary, index: &ContextIndex) -> String {
    let mut hasher = Sha256::new();

    let mut words: Vec<&WordRepresentation> = vocabulary.iter().collect();
    words.sort_by(|a, b| a.word.cmp(&b.word));

    hasher.update(b"vocabulary\0");
    for rep in words {
        hash_representation(&mut hasher, rep);
    }
    hasher.update(b"fallback\0");
    hash_representation(&mut hasher, vocabulary.fallback());

    hasher.update(b"context\0");
    for (name, dimension, count) in index.iter() {
        hasher.update(name.as_bytes());
        hasher.update([0]);
        hasher.update((dimension as u64).to_le_bytes());
        hasher.update(count.to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

fn hash_representation(hasher: &mut Sha256, rep: &WordRepresentation) {
    hasher.update(rep.word.as_bytes());
    hasher.update([0]);
    hasher.update(rep.occurrences.to_le_bytes());
    hasher.update([u8::from(rep.is_full)]);

    let mut contexts: Vec<(&String, &u64)> = rep.contexts.iter().collect();
    contexts.sort();
    for (name, count) in contexts {
        hasher.update(name.as_bytes());
        hasher.update([0]);
        hasher.update(count.to_le_bytes());
    }
    hasher.update([0xff]);
}
