use rand::rngs::StdRng;

use super::{relu, Linear};
use crate::scratch::ScratchPool;

/// Position-wise `down(relu(up(x)))`.
#[derive(Debug, Clone)]
pub struct FeedForward {
    up: Linear,
    down: Linear,
}

impl FeedForward {
    pub fn new(dim: usize, hidden_dim: usize, rng: &mut StdRng) -> Self {
        Self {
            up: Linear::xavier(dim, hidden_dim, rng),
            down: Linear::xavier(hidden_dim, dim, rng),
        }
    }

    pub fn forward_into(&self, x: &[f32], out: &mut [f32], pool: &ScratchPool) {
        let mut hidden = pool.lease(self.up.out_features());
        self.up.forward_into(x, &mut hidden);
        hidden.iter_mut().for_each(|h| *h = relu(*h));
        self.down.forward_into(&hidden, out);
    }

    pub fn param_count(&self) -> usize {
        self.up.param_count() + self.down.param_count()
    }
}
