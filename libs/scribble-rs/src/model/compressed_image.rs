use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};

/// Run lengths rewritten as frequency ranks. Rank 0 is the most common run length.
///
/// This is a static small-alphabet remap, not entropy coding: ranks are stored as whole
/// integers, so the size win comes from the host format (JSON) spelling small repeated numbers
/// in fewer bytes than arbitrary run lengths.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct CompressedImage {
    pub frequencies: BTreeMap<u32, u32>,
    pub sequences: Vec<u32>,
}

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompressionStats {
    pub runs: usize,
    pub distinct_runs: usize,
    pub largest_rank: u32,
    pub serialized_len: usize,
}

impl CompressedImage {
    /// Ranks referenced by `sequences` that `frequencies` cannot resolve.
    pub fn missing_ranks(&self) -> Vec<u32> {
        let mut missing: Vec<u32> = self
            .sequences
            .iter()
            .filter(|rank| !self.frequencies.contains_key(rank))
            .copied()
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    pub fn stats(&self) -> CompressionStats {
        CompressionStats {
            runs: self.sequences.len(),
            distinct_runs: self.frequencies.len(),
            largest_rank: self.frequencies.keys().next_back().copied().unwrap_or_default(),
            serialized_len: serde_json::to_vec(self).map(|v| v.len()).unwrap_or_default(),
        }
    }
}

/// The image field of a card. Compressed records are told apart from literal bitmaps by shape:
/// an object carrying `sequences` versus a plain string.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum CardImage {
    Compressed(CompressedImage),
    /// A `data:image/png;base64,` url.
    Bitmap(String),
}

// Not `untagged` on the way in: buffered content cannot turn the string keys of `frequencies`
// back into integers.
impl<'de> Deserialize<'de> for CardImage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(url) => Ok(CardImage::Bitmap(url)),
            value => serde_json::from_value(value)
                .map(CardImage::Compressed)
                .map_err(de::Error::custom),
        }
    }
}

impl CardImage {
    pub fn is_compressed(&self) -> bool {
        matches!(self, CardImage::Compressed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_image_shapes() {
        let compressed: CardImage =
            serde_json::from_str(r#"{"frequencies":{"0":250000},"sequences":[0]}"#).unwrap();
        assert_eq!(
            compressed,
            CardImage::Compressed(CompressedImage {
                frequencies: BTreeMap::from([(0, 250000)]),
                sequences: vec![0],
            })
        );

        let bitmap: CardImage = serde_json::from_str(r#""data:image/png;base64,AAAA""#).unwrap();
        assert_eq!(bitmap, CardImage::Bitmap("data:image/png;base64,AAAA".to_string()));
        assert!(!bitmap.is_compressed());
    }

    #[test]
    fn missing_ranks_are_reported_once() {
        let image = CompressedImage {
            frequencies: BTreeMap::from([(0, 3)]),
            sequences: vec![0, 2, 1, 2],
        };
        assert_eq!(image.missing_ranks(), vec![1, 2]);
    }
}
