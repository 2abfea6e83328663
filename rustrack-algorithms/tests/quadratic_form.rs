#![allow(clippy::cast_precision_loss, clippy::unreadable_literal)]
use approx::assert_relative_eq;
use ndarray::Array1;
use rustrack_algorithms::{
    curvature_energy, curvature_energy_gradient, curvature_energy_matrix, CurvatureConfig,
    InteractionMatrix, PointBatch, Segment,
};

struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }
}

fn random_symmetric(rng: &mut Lcg, n: usize, entries: usize) -> InteractionMatrix {
    let mut triplets = Vec::with_capacity(2 * entries);
    for _ in 0..entries {
        let i = rng.below(n);
        let j = rng.below(n);
        if i == j {
            continue;
        }
        let value = rng.next_f64() * 2.0 - 1.0;
        triplets.push((i, j, value));
        triplets.push((j, i, value));
    }
    InteractionMatrix::from_triplets(n, triplets).unwrap()
}

#[test]
fn test_energy_equals_half_quadratic_form() {
    let mut rng = Lcg(7);
    for n in [1, 2, 5, 40, 300] {
        let w = random_symmetric(&mut rng, n, 3 * n);
        let x: Vec<f64> = (0..n).map(|_| rng.next_f64()).collect();

        let dense = w.to_dense();
        let xa = Array1::from(x.clone());
        let expected_gradient = dense.dot(&xa);
        let expected_energy = 0.5 * xa.dot(&expected_gradient);

        let energy = curvature_energy(&w, &x).unwrap();
        let gradient = curvature_energy_gradient(&w, &x).unwrap();

        assert_relative_eq!(energy, expected_energy, epsilon = 1e-12, max_relative = 1e-10);
        for (g, e) in gradient.iter().zip(expected_gradient.iter()) {
            assert_relative_eq!(*g, *e, epsilon = 1e-12, max_relative = 1e-10);
        }
    }
}

#[test]
fn test_energy_is_sum_over_upper_triangle() {
    let mut rng = Lcg(99);
    let n = 25;
    let w = random_symmetric(&mut rng, n, 60);
    let x: Vec<f64> = (0..n).map(|_| rng.next_f64()).collect();

    let upper: f64 = w
        .iter()
        .filter(|&(i, j, _)| i < j)
        .map(|(i, j, value)| value * x[i] * x[j])
        .sum();
    assert_relative_eq!(curvature_energy(&w, &x).unwrap(), upper, max_relative = 1e-10);
}

#[test]
fn test_assembled_matrix_symmetric_for_random_clouds() {
    let mut rng = Lcg(2024);
    for (n_hits, n_segments) in [(3, 4), (20, 60), (200, 1500)] {
        let mut positions = PointBatch::with_capacity(2, n_hits).unwrap();
        for _ in 0..n_hits {
            positions
                .push(&[rng.next_f64() * 10.0, rng.next_f64() * 10.0])
                .unwrap();
        }
        let segments: Vec<Segment> = (0..n_segments)
            .filter_map(|_| {
                let start = rng.below(n_hits);
                let end = rng.below(n_hits);
                (start != end).then(|| Segment::new(start, end))
            })
            .collect();

        for (config, cut_at_right_angle) in [
            (CurvatureConfig::default(), false),
            (
                CurvatureConfig::new()
                    .with_cosine_threshold(0.0)
                    .with_cosine_power(1.0)
                    .with_distance_prod_power(2.0),
                true,
            ),
        ] {
            let w = curvature_energy_matrix(&positions, &segments, &config).unwrap();
            assert_eq!(w.dim(), segments.len());
            assert!(w.is_symmetric());
            assert!(w.has_zero_diagonal());
            if cut_at_right_angle {
                assert!(w.iter().all(|(_, _, value)| value <= 0.0));
            }
        }
    }
}
