//! Closed-form algebra for the complex 2x2 matrices of the dot-Majorana system
//!
//! The scattering region always holds exactly two levels, so inversion is carried out through the
//! determinant rather than a general dense solver.

use crate::constants::DETERMINANT_THRESHOLD;
use nalgebra::{Matrix2, RealField};
use num_complex::Complex;

/// True if `|det matrix|` falls below `DETERMINANT_THRESHOLD`
pub(crate) fn is_singular<T: Copy + RealField>(matrix: &Matrix2<Complex<T>>) -> bool {
    let determinant = matrix[(0, 0)] * matrix[(1, 1)] - matrix[(0, 1)] * matrix[(1, 0)];
    let threshold: T = nalgebra::convert(DETERMINANT_THRESHOLD);
    determinant.norm_sqr() < threshold * threshold
}

/// Inverts `matrix` through its determinant, returning `None` if it is singular
pub(crate) fn try_invert_2x2<T: Copy + RealField>(
    matrix: &Matrix2<Complex<T>>,
) -> Option<Matrix2<Complex<T>>> {
    if is_singular(matrix) {
        return None;
    }
    let (a, b, c, d) = (
        matrix[(0, 0)],
        matrix[(0, 1)],
        matrix[(1, 0)],
        matrix[(1, 1)],
    );
    let inverse_determinant = Complex::new(T::one(), T::zero()) / (a * d - b * c);
    Some(Matrix2::new(
        d * inverse_determinant,
        -b * inverse_determinant,
        -c * inverse_determinant,
        a * inverse_determinant,
    ))
}

/// Inverts `matrix`, substituting the zero matrix when it is singular
pub(crate) fn invert_2x2<T: Copy + RealField>(matrix: &Matrix2<Complex<T>>) -> Matrix2<Complex<T>> {
    try_invert_2x2(matrix).unwrap_or_else(Matrix2::zeros)
}

/// The Hermitian conjugate of `matrix`
pub(crate) fn conjugate_transpose<T: Copy + RealField>(
    matrix: &Matrix2<Complex<T>>,
) -> Matrix2<Complex<T>> {
    Matrix2::new(
        matrix[(0, 0)].conj(),
        matrix[(1, 0)].conj(),
        matrix[(0, 1)].conj(),
        matrix[(1, 1)].conj(),
    )
}

/// Tests for hermiticity of a matrix
pub(crate) fn is_hermitian<T: Copy + RealField>(matrix: &Matrix2<Complex<T>>) -> bool {
    let tolerance = T::default_epsilon() * nalgebra::convert(100.);
    let adjoint = conjugate_transpose(matrix);
    matrix
        .iter()
        .zip(adjoint.iter())
        .all(|(element, adjoint_element)| {
            (element - adjoint_element).norm_sqr() < tolerance * tolerance
        })
}

/// Tests for anti-hermiticity of a matrix, relative to the scale of its largest element
pub(crate) fn is_anti_hermitian<T: Copy + RealField>(matrix: &Matrix2<Complex<T>>) -> bool {
    let mut scale = matrix
        .iter()
        .fold(T::zero(), |scale, element| scale.max(element.norm_sqr()));
    if scale == T::zero() {
        scale = T::one();
    }
    let tolerance = T::default_epsilon() * nalgebra::convert(10000.);
    let adjoint = conjugate_transpose(matrix);
    matrix
        .iter()
        .zip(adjoint.iter())
        .all(|(element, adjoint_element)| {
            (element + adjoint_element).norm_sqr() / scale < tolerance * tolerance
        })
}

#[cfg(test)]
mod test {
    use super::{
        conjugate_transpose, invert_2x2, is_anti_hermitian, is_hermitian, is_singular, try_invert_2x2,
    };
    use nalgebra::Matrix2;
    use num_complex::Complex;

    #[test]
    fn real_non_hermitian_matrix_returns_false() {
        let matrix = Matrix2::new(1., 2., 3., 4.).map(Complex::from);
        assert!(!is_hermitian(&matrix));
    }

    #[test]
    fn real_hermitian_matrix_returns_true() {
        let matrix = Matrix2::new(1., -1., -1., 0.).map(Complex::from);
        assert!(is_hermitian(&matrix));
    }

    #[test]
    fn complex_hermitian_matrices_return_true() {
        let matrix = Matrix2::new(
            Complex::new(1., 0.),
            Complex::new(1., -2.),
            Complex::new(1., 2.),
            Complex::new(-3., 0.),
        );
        assert!(is_hermitian(&matrix));
        let matrix = Matrix2::new(
            Complex::new(1., 1.),
            Complex::new(1., -2.),
            Complex::new(1., 2.),
            Complex::new(-3., 0.),
        );
        assert!(!is_hermitian(&matrix));
    }

    #[test]
    fn anti_hermitian_matrix_returns_true() {
        let matrix = Matrix2::new(
            Complex::new(0., -1.),
            Complex::new(2., 1.),
            Complex::new(-2., 1.),
            Complex::new(0., 0.),
        );
        assert!(is_anti_hermitian(&matrix));
        assert!(!is_hermitian(&matrix));
    }

    #[test]
    fn conjugate_transpose_swaps_and_conjugates() {
        let matrix = Matrix2::new(
            Complex::new(1., 2.),
            Complex::new(3., 4.),
            Complex::new(5., 6.),
            Complex::new(7., 8.),
        );
        let adjoint = conjugate_transpose(&matrix);
        assert_eq!(adjoint, matrix.adjoint());
        assert_eq!(conjugate_transpose(&adjoint), matrix);
    }

    #[test]
    fn inverse_multiplies_to_identity() {
        let matrix = Matrix2::new(
            Complex::new(0.3, 0.05),
            Complex::new(-1., 0.),
            Complex::new(-1., 0.),
            Complex::new(0.2, 0.001),
        );
        let inverse = invert_2x2(&matrix);
        let product = matrix * inverse;
        let identity = Matrix2::<Complex<f64>>::identity();
        for (element, expected) in product.iter().zip(identity.iter()) {
            approx::assert_relative_eq!(element.re, expected.re, epsilon = 1e-12);
            approx::assert_relative_eq!(element.im, expected.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn inverse_coincides_with_the_dense_inverse() {
        let matrix = Matrix2::new(
            Complex::new(0.9, 0.5),
            Complex::new(0.1, -0.2),
            Complex::new(0.4, 0.3),
            Complex::new(-0.7, 0.02),
        );
        let dense = matrix.try_inverse().unwrap();
        let closed_form = invert_2x2(&matrix);
        for (element, expected) in closed_form.iter().zip(dense.iter()) {
            approx::assert_relative_eq!(element.re, expected.re, epsilon = 1e-12);
            approx::assert_relative_eq!(element.im, expected.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn singular_matrix_inverts_to_zero() {
        let matrix = Matrix2::new(1., 2., 2., 4.).map(Complex::from);
        assert!(is_singular(&matrix));
        assert!(try_invert_2x2(&matrix).is_none());
        assert_eq!(invert_2x2(&matrix), Matrix2::zeros());
        // Just below the threshold
        let matrix = Matrix2::new(1e-8, 0., 0., 1e-7).map(Complex::from);
        assert_eq!(invert_2x2(&matrix), Matrix2::zeros());
    }
}
