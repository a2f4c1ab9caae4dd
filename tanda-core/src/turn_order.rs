use crate::types::Address;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// How successive swap positions are drawn from the single random word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleStrategy {
    /// `j = word mod (i + 1)`, then `word /= 10` after every swap.
    /// Later swaps see little entropy for large groups, but the output
    /// matches games already scheduled this way.
    #[default]
    Legacy,
    /// `j = sha256(word || i) mod (i + 1)`, an independent draw per step.
    Hashed,
}

/// Permutation of `0..n` produced by a backwards Fisher-Yates pass over `word`.
pub fn shuffle_indices(word: &BigUint, n: usize, strategy: ShuffleStrategy) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut state = word.clone();
    let ten = BigUint::from(10u32);

    for i in (1..n).rev() {
        let bound = i as u64 + 1;
        let j = match strategy {
            ShuffleStrategy::Legacy => {
                let j = reduce(&state, bound);
                state = &state / &ten;
                j
            }
            ShuffleStrategy::Hashed => {
                let mut hasher = Sha256::new();
                hasher.update(word.to_bytes_be());
                hasher.update((i as u64).to_be_bytes());
                reduce(&BigUint::from_bytes_be(&hasher.finalize()), bound)
            }
        };

        tracing::debug!("Shuffle step {}: swap with {}", i, j);
        indices.swap(i, j as usize);
    }

    indices
}

/// Turn order for `players`: slot `k` belongs to `players[permutation[k]]`.
pub fn assign_turns(players: &[Address], word: &BigUint, strategy: ShuffleStrategy) -> Vec<Address> {
    shuffle_indices(word, players.len(), strategy)
        .into_iter()
        .map(|index| players[index].clone())
        .collect()
}

// The remainder is below `bound`, so it always fits in the lowest digit.
fn reduce(value: &BigUint, bound: u64) -> u64 {
    (value % BigUint::from(bound))
        .iter_u64_digits()
        .next()
        .unwrap_or(0)
}
