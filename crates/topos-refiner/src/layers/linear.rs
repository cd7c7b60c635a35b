use rand::rngs::StdRng;
use rand::Rng;

/// Dense linear map `y = Wx + b` with row-major weights.
#[derive(Debug, Clone)]
pub struct Linear {
    in_features: usize,
    out_features: usize,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl Linear {
    /// Xavier/Glorot uniform init, zero bias.
    pub fn xavier(in_features: usize, out_features: usize, rng: &mut StdRng) -> Self {
        let limit = (6.0 / (in_features + out_features) as f32).sqrt();
        let weights = (0..in_features * out_features)
            .map(|_| rng.gen_range(-limit..=limit))
            .collect();
        Self {
            in_features,
            out_features,
            weights,
            bias: vec![0.0; out_features],
        }
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    /// Write `Wx + b` into `out`. Callers size both slices; only the
    /// overlapping prefix is used otherwise.
    pub fn forward_into(&self, input: &[f32], out: &mut [f32]) {
        debug_assert_eq!(input.len(), self.in_features);
        debug_assert_eq!(out.len(), self.out_features);
        for ((o, row), b) in out
            .iter_mut()
            .zip(self.weights.chunks_exact(self.in_features))
            .zip(&self.bias)
        {
            *o = b + row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>();
        }
    }

    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0; self.out_features];
        self.forward_into(input, &mut out);
        out
    }

    /// Weights plus bias.
    pub fn param_count(&self) -> usize {
        self.weights.len() + self.bias.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn xavier_is_bounded_and_seeded() {
        let mut rng = StdRng::seed_from_u64(7);
        let layer = Linear::xavier(4, 2, &mut rng);
        let limit = (6.0f32 / 6.0).sqrt();
        assert!(layer.weights.iter().all(|w| w.abs() <= limit));
        assert_eq!(layer.param_count(), 10);

        let mut rng2 = StdRng::seed_from_u64(7);
        let twin = Linear::xavier(4, 2, &mut rng2);
        assert_eq!(layer.forward(&[1.0, 2.0, 3.0, 4.0]), twin.forward(&[1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn zero_input_yields_bias() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Linear::xavier(3, 5, &mut rng);
        assert_eq!(layer.forward(&[0.0; 3]), vec![0.0; 5]);
    }
}
