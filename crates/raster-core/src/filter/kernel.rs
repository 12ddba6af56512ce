//! Convolution kernels.

use crate::image::RasterError;

/// Fixed 5x5 Bartlett (tent) filter, unnormalized. Sums to 81.
const BARTLETT_5X5: [[f32; 5]; 5] = [
    [1.0, 2.0, 3.0, 2.0, 1.0],
    [2.0, 4.0, 6.0, 4.0, 2.0],
    [3.0, 6.0, 9.0, 6.0, 3.0],
    [2.0, 4.0, 6.0, 4.0, 2.0],
    [1.0, 2.0, 3.0, 2.0, 1.0],
];

/// Fixed 5x5 Gaussian approximation, unnormalized. Sums to 273.
const GAUSSIAN_5X5: [[f32; 5]; 5] = [
    [1.0, 4.0, 7.0, 4.0, 1.0],
    [4.0, 16.0, 26.0, 16.0, 4.0],
    [7.0, 26.0, 41.0, 26.0, 7.0],
    [4.0, 16.0, 26.0, 16.0, 4.0],
    [1.0, 4.0, 7.0, 4.0, 1.0],
];

/// A square convolution kernel with a constant bias term.
///
/// Weights are stored row-major and already normalized; the convolution
/// output for a pixel is `sum(weight * sample) + bias`, clamped to [0, 1].
#[derive(Debug, Clone)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
    bias: f32,
}

impl Kernel {
    /// Build a kernel from raw weights. `weights` must hold `size * size`
    /// entries and `size` must be odd so the kernel has a center pixel.
    pub fn new(size: usize, weights: Vec<f32>, bias: f32) -> Result<Self, RasterError> {
        if size == 0 || size % 2 == 0 {
            return Err(RasterError::InvalidParameter(format!(
                "kernel size must be odd and nonzero, got {size}"
            )));
        }
        if weights.len() != size * size {
            return Err(RasterError::InvalidParameter(format!(
                "kernel of size {size} needs {} weights, got {}",
                size * size,
                weights.len()
            )));
        }
        Ok(Self {
            size,
            weights,
            bias,
        })
    }

    /// 5x5 box filter, every weight 1/25.
    pub fn box_blur() -> Self {
        Self {
            size: 5,
            weights: vec![1.0 / 25.0; 25],
            bias: 0.0,
        }
    }

    /// 5x5 Bartlett (tent) filter.
    pub fn bartlett() -> Self {
        Self::from_table(&BARTLETT_5X5, 81.0)
    }

    /// 5x5 Gaussian filter.
    pub fn gaussian() -> Self {
        Self::from_table(&GAUSSIAN_5X5, 273.0)
    }

    /// NxN Gaussian built from binomial coefficients. `n` must be odd and
    /// at least 3.
    pub fn gaussian_n(n: usize) -> Result<Self, RasterError> {
        if n < 3 || n % 2 == 0 {
            return Err(RasterError::InvalidParameter(format!(
                "gaussian size must be odd and >= 3, got {n}"
            )));
        }
        let row = binomial_row(n);
        let row_sum: f64 = row.iter().sum();
        let norm = row_sum * row_sum;

        let mut weights = Vec::with_capacity(n * n);
        for &wy in &row {
            for &wx in &row {
                weights.push(((wy * wx) / norm) as f32);
            }
        }
        Ok(Self {
            size: n,
            weights,
            bias: 0.0,
        })
    }

    /// 5x5 edge detector: negated Gaussian with +1 at the center and a 0.5
    /// bias so zero response maps to mid-gray.
    pub fn edge_detect() -> Self {
        let mut kernel = Self::from_table(&GAUSSIAN_5X5, -273.0);
        kernel.weights[12] += 1.0;
        kernel.bias = 0.5;
        kernel
    }

    /// 5x5 enhancement filter: negated Gaussian with +2 at the center,
    /// equivalent to adding the edge response back onto the original.
    pub fn enhance() -> Self {
        let mut kernel = Self::from_table(&GAUSSIAN_5X5, -273.0);
        kernel.weights[12] += 2.0;
        kernel
    }

    fn from_table(table: &[[f32; 5]; 5], norm: f32) -> Self {
        let weights = table.iter().flatten().map(|&w| w / norm).collect();
        Self {
            size: 5,
            weights,
            bias: 0.0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Half-width: the number of pixels the kernel extends past its center.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> f32 {
        self.weights[ky * self.size + kx]
    }
}

/// Row `n - 1` of Pascal's triangle, as f64 to stay exact for practical n.
fn binomial_row(n: usize) -> Vec<f64> {
    let mut row = vec![1.0];
    for _ in 1..n {
        let mut next = vec![1.0; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_sum(kernel: &Kernel) -> f32 {
        let mut sum = 0.0;
        for ky in 0..kernel.size() {
            for kx in 0..kernel.size() {
                sum += kernel.weight(kx, ky);
            }
        }
        sum
    }

    #[test]
    fn test_blur_kernels_sum_to_one() {
        assert!((weight_sum(&Kernel::box_blur()) - 1.0).abs() < 1e-5);
        assert!((weight_sum(&Kernel::bartlett()) - 1.0).abs() < 1e-5);
        assert!((weight_sum(&Kernel::gaussian()) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_gaussian_n_matches_fixed_5x5() {
        let generic = Kernel::gaussian_n(5).unwrap();
        // Binomial [1,4,6,4,1] differs slightly from the classic integer
        // table, but both are normalized, symmetric, and center-heavy.
        assert_eq!(generic.size(), 5);
        assert!((weight_sum(&generic) - 1.0).abs() < 1e-5);
        assert_eq!(generic.weight(0, 0), generic.weight(4, 4));
        assert!(generic.weight(2, 2) > generic.weight(0, 0));
    }

    #[test]
    fn test_gaussian_n_rejects_bad_sizes() {
        assert!(Kernel::gaussian_n(1).is_err());
        assert!(Kernel::gaussian_n(4).is_err());
    }

    #[test]
    fn test_edge_detect_sums_to_zero() {
        // -1 + 1 at the center: a flat region produces zero response,
        // mapped to 0.5 by the bias.
        let kernel = Kernel::edge_detect();
        assert!(weight_sum(&kernel).abs() < 1e-5);
        assert_eq!(kernel.bias(), 0.5);
    }

    #[test]
    fn test_enhance_sums_to_one() {
        // -1 + 2 at the center: flat regions pass through unchanged.
        let kernel = Kernel::enhance();
        assert!((weight_sum(&kernel) - 1.0).abs() < 1e-5);
        assert_eq!(kernel.bias(), 0.0);
    }

    #[test]
    fn test_new_validates_size_and_length() {
        assert!(Kernel::new(0, vec![], 0.0).is_err());
        assert!(Kernel::new(2, vec![0.25; 4], 0.0).is_err());
        assert!(Kernel::new(3, vec![0.0; 8], 0.0).is_err());
        assert!(Kernel::new(3, vec![1.0 / 9.0; 9], 0.0).is_ok());
    }

    #[test]
    fn test_binomial_row() {
        assert_eq!(binomial_row(5), vec![1.0, 4.0, 6.0, 4.0, 1.0]);
        assert_eq!(binomial_row(3), vec![1.0, 2.0, 1.0]);
    }
}
