//! Transformer building blocks. All math is plain `f32` slices, row-major.

mod attention;
mod block;
mod feed_forward;
mod linear;
mod norm;

pub use attention::MultiHeadSelfAttention;
pub use block::TransformerBlock;
pub use feed_forward::FeedForward;
pub use linear::Linear;
pub use norm::LayerNorm;

#[inline]
pub(crate) fn relu(x: f32) -> f32 {
    x.max(0.0)
}

/// Numerically stable softmax, in place.
pub(crate) fn softmax_in_place(scores: &mut [f32]) {
    if scores.is_empty() {
        return;
    }
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    for s in scores.iter_mut() {
        *s = (*s - max).exp();
        sum += *s;
    }
    let inv = if sum > 1e-10 { 1.0 / sum } else { 0.0 };
    for s in scores.iter_mut() {
        *s *= inv;
    }
}
