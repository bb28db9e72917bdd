use ndarray::{Array1, Array2, Axis};
use ndarray_stats::QuantileExt;

pub fn l2(v: &Array1<f64>) -> f64 {
    v.pow2().sum().sqrt()
}

/// Euclidean norm of every row.
pub fn row_l2(m: &Array2<f64>) -> Array1<f64> {
    m.pow2().sum_axis(Axis(1)).mapv(f64::sqrt)
}

/// Row-wise Euclidean distance between two `(n, d)` matrices.
pub fn pairwise_l2(a: &Array2<f64>, b: &Array2<f64>) -> Array1<f64> {
    row_l2(&(a - b))
}

/// Largest value of the series ignoring NaN. `None` for an empty or
/// all-NaN series.
pub fn nan_max(v: &Array1<f64>) -> Option<f64> {
    if v.is_empty() {
        return None;
    }

    let m = *v.max_skipnan();
    if m.is_nan() { None } else { Some(m) }
}

/// Index of the largest value, `None` when the series is empty or holds NaN.
pub fn argmax(v: &Array1<f64>) -> Option<usize> {
    v.argmax().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn l2_of_3_4_is_5() {
        assert_eq!(l2(&array![3., 4.]), 5.);
    }

    #[test]
    fn pairwise_distances() {
        let a = array![[0., 0., 0.], [1., 1., 1.]];
        let b = array![[3., 4., 0.], [1., 1., 1.]];
        assert_eq!(pairwise_l2(&a, &b), array![5., 0.]);
    }

    #[test]
    fn nan_max_skips_nan() {
        assert_eq!(nan_max(&array![1., f64::NAN, 3.]), Some(3.));
        assert_eq!(nan_max(&array![f64::NAN]), None);
        assert_eq!(nan_max(&Array1::zeros(0)), None);
        assert_eq!(argmax(&array![1., 7., 3.]), Some(1));
        assert_eq!(argmax(&array![1., f64::NAN]), None);
    }
}
