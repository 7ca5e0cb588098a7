use crate::math::vector::Vec3;

pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f64).sqrt()
    }

    /// RMS of the vector magnitudes, e.g. rotation angles of a set of rotation vectors.
    pub fn rms_norm(vectors: &[Vec3]) -> f64 {
        let norms: Vec<f64> = vectors.iter().map(|v| v.norm()).collect();
        Self::rms(&norms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_of_empty_or_zero_input_is_zero() {
        assert_eq!(StatsHelper::rms(&[]), 0.0);
        assert_eq!(StatsHelper::rms_norm(&[Vec3::ZERO, Vec3::ZERO]), 0.0);
    }

    #[test]
    fn rms_norm_uses_vector_lengths() {
        let vectors = [Vec3::new(3.0, 4.0, 0.0), Vec3::new(0.0, 0.0, 5.0)];
        assert_eq!(StatsHelper::rms_norm(&vectors), 5.0);
    }
}
