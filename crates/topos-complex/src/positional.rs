//! Sinusoidal positional term added to embeddings before refinement.
//!
//! The position is the node's rank in insertion order. It carries no causal
//! meaning; it only breaks symmetry between structurally identical nodes.

/// Standard transformer encoding: `sin` on even dimensions, `cos` on odd,
/// with wavelengths growing geometrically up to 10000·2π.
pub fn sinusoidal(position: usize, dim: usize) -> Vec<f32> {
    (0..dim)
        .map(|i| {
            let exponent = (2 * (i / 2)) as f32 / dim as f32;
            let angle = position as f32 / 10_000f32.powf(exponent);
            if i % 2 == 0 {
                angle.sin()
            } else {
                angle.cos()
            }
        })
        .collect()
}

/// `embedding + scale · sinusoidal(position, len)`.
pub fn add_scaled(embedding: &[f32], position: usize, scale: f32) -> Vec<f32> {
    embedding
        .iter()
        .zip(sinusoidal(position, embedding.len()))
        .map(|(x, p)| x + scale * p)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_zero_alternates_zero_and_one() {
        assert_eq!(sinusoidal(0, 4), vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn scaled_term_is_small() {
        let base = vec![0.5; 8];
        let shifted = add_scaled(&base, 3, 0.1);
        assert!(shifted
            .iter()
            .zip(&base)
            .all(|(s, b)| (s - b).abs() <= 0.1 + 1e-6));
        assert_ne!(shifted, base);
    }
}
