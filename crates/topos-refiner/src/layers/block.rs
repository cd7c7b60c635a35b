use rand::rngs::StdRng;

use super::{FeedForward, LayerNorm, MultiHeadSelfAttention};
use crate::scratch::ScratchPool;

/// Post-norm transformer block:
/// `x = norm(x + attn(x))`, then `x = norm(x + ffn(x))` per token.
/// Normalization is skipped when disabled.
#[derive(Debug, Clone)]
pub struct TransformerBlock {
    dim: usize,
    attention: MultiHeadSelfAttention,
    feed_forward: FeedForward,
    attention_norm: Option<LayerNorm>,
    feed_forward_norm: Option<LayerNorm>,
}

impl TransformerBlock {
    pub fn new(
        dim: usize,
        hidden_dim: usize,
        num_heads: usize,
        use_layer_norm: bool,
        rng: &mut StdRng,
    ) -> Self {
        Self {
            dim,
            attention: MultiHeadSelfAttention::new(dim, num_heads, rng),
            feed_forward: FeedForward::new(dim, hidden_dim, rng),
            attention_norm: use_layer_norm.then(|| LayerNorm::new(dim)),
            feed_forward_norm: use_layer_norm.then(|| LayerNorm::new(dim)),
        }
    }

    /// Transform a `len × dim` sequence in place.
    pub fn forward_in_place(&self, seq: &mut [f32], len: usize, pool: &ScratchPool) {
        let d = self.dim;

        let mut attended = pool.lease(len * d);
        self.attention.forward_into(seq, len, &mut attended, pool);
        for (x, a) in seq.iter_mut().zip(attended.iter()) {
            *x += a;
        }
        if let Some(norm) = &self.attention_norm {
            seq.chunks_exact_mut(d).for_each(|t| norm.forward_in_place(t));
        }

        let mut ff = pool.lease(d);
        for token in seq.chunks_exact_mut(d) {
            self.feed_forward.forward_into(token, &mut ff, pool);
            for (x, f) in token.iter_mut().zip(ff.iter()) {
                *x += f;
            }
            if let Some(norm) = &self.feed_forward_norm {
                norm.forward_in_place(token);
            }
        }
    }

    pub fn param_count(&self) -> usize {
        self.attention.param_count() + self.feed_forward.param_count()
    }
}
