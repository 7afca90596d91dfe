//! Derivative-free minimisation (Nelder-Mead simplex).
use crate::config::OptimizerSettings;

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub x: Vec<f64>,
    pub fun: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Minimise `f` starting from `x0`. Non-finite objective values are treated as +inf,
/// so the simplex walks away from regions where the objective is undefined.
pub fn nelder_mead<F>(f: F, x0: &[f64], settings: &OptimizerSettings) -> Minimum
where
    F: Fn(&[f64]) -> f64,
{
    let eval = |x: &[f64]| {
        let v = f(x);
        if v.is_finite() { v } else { f64::INFINITY }
    };

    let n = x0.len();
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
    simplex.push((x0.to_vec(), eval(x0)));
    for i in 0..n {
        let mut vertex = x0.to_vec();
        vertex[i] += settings.initial_step;
        let v = eval(&vertex);
        simplex.push((vertex, v));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < settings.max_iterations {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

        let best = simplex[0].1;
        let worst = simplex[n].1;
        let f_spread = (worst - best).abs();
        let x_spread = simplex[1..]
            .iter()
            .flat_map(|(v, _)| v.iter().zip(&simplex[0].0).map(|(a, b)| (a - b).abs()))
            .fold(0.0, f64::max);
        if f_spread <= settings.f_tolerance && x_spread <= settings.x_tolerance {
            converged = true;
            break;
        }
        iterations += 1;

        let centroid: Vec<f64> = (0..n)
            .map(|j| simplex[..n].iter().map(|(v, _)| v[j]).sum::<f64>() / n as f64)
            .collect();
        let towards = |from: &[f64], coef: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(from)
                .map(|(c, x)| c + coef * (x - c))
                .collect()
        };

        let reflected = towards(&simplex[n].0, -REFLECT);
        let f_reflected = eval(&reflected);

        if f_reflected < best {
            let expanded = towards(&reflected, EXPAND);
            let f_expanded = eval(&expanded);
            simplex[n] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
            continue;
        }

        if f_reflected < simplex[n - 1].1 {
            simplex[n] = (reflected, f_reflected);
            continue;
        }

        let (contracted, f_contracted) = if f_reflected < worst {
            let c = towards(&reflected, CONTRACT);
            let fc = eval(&c);
            (c, fc)
        } else {
            let c = towards(&simplex[n].0, CONTRACT);
            let fc = eval(&c);
            (c, fc)
        };

        if f_contracted < f_reflected.min(worst) {
            simplex[n] = (contracted, f_contracted);
            continue;
        }

        let anchor = simplex[0].0.clone();
        for (vertex, value) in simplex.iter_mut().skip(1) {
            for (x, a) in vertex.iter_mut().zip(&anchor) {
                *x = a + SHRINK * (*x - a);
            }
            *value = eval(vertex);
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (x, fun) = simplex.swap_remove(0);
    Minimum {
        x,
        fun,
        iterations,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::config::MODEL};

    #[test]
    fn finds_quadratic_bowl_minimum() {
        let bowl = |x: &[f64]| (x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2) + 2.0;
        let min = nelder_mead(bowl, &[0.0, 0.0], &MODEL.optimizer);
        assert!(min.converged);
        assert!((min.x[0] - 3.0).abs() < 1e-4);
        assert!((min.x[1] + 1.0).abs() < 1e-4);
        assert!((min.fun - 2.0).abs() < 1e-8);
    }

    #[test]
    fn handles_rosenbrock() {
        let rosen = |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
        let min = nelder_mead(rosen, &[-1.2, 1.0], &MODEL.optimizer);
        assert!((min.x[0] - 1.0).abs() < 1e-3);
        assert!((min.x[1] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn steps_away_from_undefined_region() {
        // ln(x) is undefined for x <= 0; the start sits right at the edge
        let f = |x: &[f64]| if x[0] > 0.0 { x[0] - x[0].ln() } else { f64::NAN };
        let min = nelder_mead(f, &[0.05], &MODEL.optimizer);
        assert!((min.x[0] - 1.0).abs() < 1e-3);
        assert!(min.fun.is_finite());
    }
}
