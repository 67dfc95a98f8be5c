use std::collections::{BTreeMap, HashMap};

use crate::model::compressed_image::CompressedImage;
use crate::model::errors::{SketchErrKind, SketchResult};

/// Remaps run lengths to ranks ordered by descending frequency. Equally frequent lengths keep
/// the order in which they first appear.
pub fn encode(runs: &[u32]) -> CompressedImage {
    // (run length, occurrences), in first-seen order
    let mut counts: Vec<(u32, usize)> = Vec::new();
    let mut slots: HashMap<u32, usize> = HashMap::new();
    for &run in runs {
        match slots.get(&run) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(run, counts.len());
                counts.push((run, 1));
            }
        }
    }

    // stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut frequencies = BTreeMap::new();
    let mut ranks = HashMap::with_capacity(counts.len());
    for (rank, (run, _)) in counts.into_iter().enumerate() {
        frequencies.insert(rank as u32, run);
        ranks.insert(run, rank as u32);
    }

    let sequences = runs.iter().map(|run| ranks[run]).collect();

    CompressedImage { frequencies, sequences }
}

/// Fails on the first rank the table cannot resolve; a record like that was corrupted or
/// written by something incompatible, and guessing a run length would shift every pixel after it.
pub fn decode(image: &CompressedImage) -> SketchResult<Vec<u32>> {
    image
        .sequences
        .iter()
        .map(|rank| {
            image
                .frequencies
                .get(rank)
                .copied()
                .ok_or_else(|| SketchErrKind::RankMissing(*rank).into())
        })
        .collect()
}
