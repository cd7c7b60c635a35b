use rand::rngs::StdRng;

use super::{softmax_in_place, Linear};
use crate::scratch::ScratchPool;

/// Multi-head scaled dot-product self-attention over a short sequence.
///
/// Sequences are flat row-major buffers: `len` tokens of `dim` features.
#[derive(Debug, Clone)]
pub struct MultiHeadSelfAttention {
    dim: usize,
    num_heads: usize,
    head_dim: usize,
    query: Linear,
    key: Linear,
    value: Linear,
    output: Linear,
}

impl MultiHeadSelfAttention {
    /// `num_heads` must divide `dim`; the refiner validates this first.
    pub fn new(dim: usize, num_heads: usize, rng: &mut StdRng) -> Self {
        Self {
            dim,
            num_heads,
            head_dim: dim / num_heads,
            query: Linear::xavier(dim, dim, rng),
            key: Linear::xavier(dim, dim, rng),
            value: Linear::xavier(dim, dim, rng),
            output: Linear::xavier(dim, dim, rng),
        }
    }

    /// Attend every token to every token; writes `len × dim` into `out`.
    pub fn forward_into(&self, seq: &[f32], len: usize, out: &mut [f32], pool: &ScratchPool) {
        let d = self.dim;
        let mut q = pool.lease(len * d);
        let mut k = pool.lease(len * d);
        let mut v = pool.lease(len * d);
        for t in 0..len {
            let token = &seq[t * d..(t + 1) * d];
            self.query.forward_into(token, &mut q[t * d..(t + 1) * d]);
            self.key.forward_into(token, &mut k[t * d..(t + 1) * d]);
            self.value.forward_into(token, &mut v[t * d..(t + 1) * d]);
        }

        let scale = 1.0 / (self.head_dim as f32).sqrt();
        let mut mixed = pool.lease(len * d);
        let mut scores = pool.lease(len);
        for h in 0..self.num_heads {
            let cols = h * self.head_dim..(h + 1) * self.head_dim;
            for i in 0..len {
                let qi = &q[i * d..(i + 1) * d][cols.clone()];
                for j in 0..len {
                    let kj = &k[j * d..(j + 1) * d][cols.clone()];
                    scores[j] = qi.iter().zip(kj).map(|(a, b)| a * b).sum::<f32>() * scale;
                }
                softmax_in_place(&mut scores);
                let target = &mut mixed[i * d..(i + 1) * d][cols.clone()];
                for j in 0..len {
                    let vj = &v[j * d..(j + 1) * d][cols.clone()];
                    for (m, x) in target.iter_mut().zip(vj) {
                        *m += scores[j] * x;
                    }
                }
            }
        }

        for t in 0..len {
            self.output
                .forward_into(&mixed[t * d..(t + 1) * d], &mut out[t * d..(t + 1) * d]);
        }
    }

    pub fn param_count(&self) -> usize {
        self.query.param_count()
            + self.key.param_count()
            + self.value.param_count()
            + self.output.param_count()
    }
}
