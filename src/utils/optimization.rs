//! Bounded Nelder-Mead simplex minimization for smoothing-parameter search.

/// Minimize `objective` over a box-bounded domain with the Nelder-Mead
/// simplex method, returning the best point found.
///
/// Deterministic for identical inputs: the simplex construction and every
/// update step are purely arithmetic. Uses the standard coefficients
/// (reflection 1, expansion 2, contraction 1/2, shrink 1/2).
pub fn minimize<F>(
    objective: F,
    initial: &[f64],
    bounds: &[(f64, f64)],
    max_iter: usize,
    tol: f64,
) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    debug_assert_eq!(bounds.len(), n);
    if n == 0 {
        return Vec::new();
    }

    let clamp = |point: &mut [f64]| {
        for (x, &(lo, hi)) in point.iter_mut().zip(bounds) {
            *x = x.clamp(lo, hi);
        }
    };

    // Initial simplex: the start point plus one vertex stepped along each axis.
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(initial.to_vec());
    for axis in 0..n {
        let mut vertex = initial.to_vec();
        vertex[axis] += 0.05 * (bounds[axis].1 - bounds[axis].0);
        clamp(&mut vertex);
        simplex.push(vertex);
    }
    let mut scores: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    for _ in 0..max_iter {
        // Order vertices best to worst.
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
        let (best, second_worst, worst) = (order[0], order[n - 1], order[n]);

        if scores[worst] - scores[best] < tol {
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; n];
        for (i, vertex) in simplex.iter().enumerate() {
            if i == worst {
                continue;
            }
            for (c, x) in centroid.iter_mut().zip(vertex) {
                *c += x / n as f64;
            }
        }

        let blend = |towards: &[f64], coeff: f64| -> Vec<f64> {
            let mut point: Vec<f64> = centroid
                .iter()
                .zip(towards)
                .map(|(c, x)| c + coeff * (x - c))
                .collect();
            clamp(&mut point);
            point
        };

        let reflected = blend(&simplex[worst], -1.0);
        let reflected_score = objective(&reflected);

        if reflected_score < scores[best] {
            let expanded = blend(&reflected, 2.0);
            let expanded_score = objective(&expanded);
            if expanded_score < reflected_score {
                simplex[worst] = expanded;
                scores[worst] = expanded_score;
            } else {
                simplex[worst] = reflected;
                scores[worst] = reflected_score;
            }
            continue;
        }

        if reflected_score < scores[second_worst] {
            simplex[worst] = reflected;
            scores[worst] = reflected_score;
            continue;
        }

        let contract_target = if reflected_score < scores[worst] {
            &reflected
        } else {
            &simplex[worst]
        };
        let contracted = blend(contract_target, 0.5);
        let contracted_score = objective(&contracted);
        if contracted_score < scores[worst].min(reflected_score) {
            simplex[worst] = contracted;
            scores[worst] = contracted_score;
            continue;
        }

        // Shrink every vertex towards the best.
        let anchor = simplex[best].clone();
        for (i, vertex) in simplex.iter_mut().enumerate() {
            if i == best {
                continue;
            }
            for (x, a) in vertex.iter_mut().zip(&anchor) {
                *x = a + 0.5 * (*x - a);
            }
            clamp(vertex);
            scores[i] = objective(vertex);
        }
    }

    let best = scores
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0);
    simplex.swap_remove(best)
}
