// Single-removal entropy-slope scan
//
// Deleting a position before a lone decoy leaves the prefix misaligned, so the
// entropy barely moves; deleting the decoy itself realigns the tail and the
// entropy drops, and deleting past it misaligns again and entropy jumps. The
// first sharp rise marks a short window that should contain the decoy.

use crate::alphabet::Symbol;
use crate::detector::config::SingleRemovalConfig;
use crate::entropy::entropy;
use crate::stream::{diff, remove_at};
use std::ops::Range;

/// Entropy of the prefix difference after deleting `index` (if any)
fn prefix_entropy(
    ciphertext: &[Symbol],
    plain_prefix: &[Symbol],
    search_space: usize,
    index: Option<usize>,
) -> f64 {
    let window = &ciphertext[..(search_space + 1).min(ciphertext.len())];
    let candidate = match index {
        Some(i) => remove_at(window, i),
        None => window.to_vec(),
    };
    let end = search_space.min(candidate.len());
    entropy(&diff(&candidate[..end], plain_prefix))
}

/// Locate a window of ciphertext indices likely to hold exactly one decoy
///
/// Returns an empty range when no entropy rise triggers.
pub fn select_removal_window(
    ciphertext: &[Symbol],
    plaintext: &[Symbol],
    config: &SingleRemovalConfig,
) -> Range<usize> {
    let search_space = config.search_space;
    let plain_prefix = &plaintext[..search_space.min(plaintext.len())];

    let start_entropy = prefix_entropy(ciphertext, plain_prefix, search_space, None);
    let first_entropy = prefix_entropy(ciphertext, plain_prefix, search_space, Some(0));

    // Removing position 0 can legitimately desynchronize the first symbol
    let mut allow_increasing = first_entropy > start_entropy * config.allow_increase_ratio;
    let mut prev_entropy = start_entropy;

    for ci in 0..search_space {
        let ent = prefix_entropy(ciphertext, plain_prefix, search_space, Some(ci));
        let delta_percent = (ent - prev_entropy) / prev_entropy * 100.0;

        tracing::trace!(ci, ent, delta_percent, allow_increasing, "removal scan");

        if delta_percent > config.trigger_percent && !allow_increasing {
            return ci.saturating_sub(config.window_back)..(ci + 1).min(search_space);
        }
        if delta_percent < 0.0 {
            allow_increasing = false;
        }
        prev_entropy = ent;
    }

    0..0
}
