//! Homogeneous 4-vectors and 4×4 affine matrices.
//!
//! Everything is `f64`. Points carry `w = 1`, directions `w = 0`; a matrix maps a point with
//! `m * p`.

use glam::{DMat4, DVec4};

pub const ZERO: DVec4 = DVec4::ZERO;
pub const X_UNIT: DVec4 = DVec4::new(1.0, 0.0, 0.0, 0.0);
pub const Y_UNIT: DVec4 = DVec4::new(0.0, 1.0, 0.0, 0.0);
pub const Z_UNIT: DVec4 = DVec4::new(0.0, 0.0, 1.0, 0.0);
pub const W_UNIT: DVec4 = DVec4::new(0.0, 0.0, 0.0, 1.0);

/// Component indices.
pub const X: usize = 0;
pub const Y: usize = 1;
pub const Z: usize = 2;

#[inline]
pub fn point(x: f64, y: f64, z: f64) -> DVec4 {
    DVec4::new(x, y, z, 1.0)
}

#[inline]
pub fn direction(x: f64, y: f64, z: f64) -> DVec4 {
    DVec4::new(x, y, z, 0.0)
}

#[inline]
pub fn to_rad(deg: f64) -> f64 {
    deg / 180.0 * std::f64::consts::PI
}

/// Build a matrix from row-major literals.
pub fn from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// Entry at `(row, col)`.
#[inline]
pub fn at(m: &DMat4, row: usize, col: usize) -> f64 {
    m.col(col)[row]
}

/// Transform `target` as a point: the `w` component is forced to 1 first.
#[inline]
pub fn transform(affine: &DMat4, target: DVec4) -> DVec4 {
    *affine * target.truncate().extend(1.0)
}

/// Scale the x, y and z axes by `a`, `b` and `c`.
pub fn scale(a: f64, b: f64, c: f64) -> DMat4 {
    DMat4::from_diagonal(DVec4::new(a, b, c, 1.0))
}

/// Translate by the xyz part of `to`.
pub fn translate(to: DVec4) -> DMat4 {
    let mut m = DMat4::IDENTITY;
    m.w_axis = DVec4::new(to.x, to.y, to.z, 1.0);
    m
}

/// Rotate by `deg` degrees about the unit `axis`.
pub fn rotate(deg: f64, axis: DVec4) -> DMat4 {
    let (s, c) = to_rad(deg).sin_cos();
    let a = [axis.x, axis.y, axis.z];

    let mut rows = [[0.0; 4]; 4];
    for i in X..=Z {
        for j in X..=Z {
            rows[i][j] = a[i] * a[j] * (1.0 - c);
        }
        rows[i][i] += c;
    }
    rows[0][1] -= a[2] * s;
    rows[0][2] += a[1] * s;
    rows[1][0] += a[2] * s;
    rows[1][2] -= a[0] * s;
    rows[2][0] -= a[1] * s;
    rows[2][1] += a[0] * s;
    rows[3][3] = 1.0;

    from_rows(rows)
}

/// Shear `axis` towards `direction` by `deg` degrees.
pub fn shear(deg: f64, axis: DVec4, direction: DVec4) -> DMat4 {
    let s = to_rad(deg).sin();
    let mut rows = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    for i in X..=Z {
        for j in X..=Z {
            if i != j {
                rows[i][j] = direction[i] * axis[j] * s;
            }
        }
    }
    from_rows(rows)
}

/// Solve `a · x = b` by Gaussian elimination with partial pivoting.
///
/// Returns `None` when `a` is singular.
pub fn solve(a: &DMat4, b: DVec4) -> Option<DVec4> {
    let mut m = a.transpose().to_cols_array_2d();
    let mut x = b.to_array();

    for k in 0..4 {
        let pivot = (k..4)
            .max_by(|&p, &q| m[p][k].abs().total_cmp(&m[q][k].abs()))
            .unwrap_or(k);
        if m[pivot][k].abs() <= f64::EPSILON {
            return None;
        }
        m.swap(k, pivot);
        x.swap(k, pivot);

        for r in k + 1..4 {
            let f = m[r][k] / m[k][k];
            for c in k..4 {
                m[r][c] -= f * m[k][c];
            }
            x[r] -= f * x[k];
        }
    }

    for k in (0..4).rev() {
        let tail: f64 = (k + 1..4).map(|c| m[k][c] * x[c]).sum();
        x[k] = (x[k] - tail) / m[k][k];
    }

    Some(DVec4::from_array(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec4, b: DVec4) -> bool {
        (a - b).abs().max_element() < 1e-12
    }

    #[test]
    fn from_rows_is_row_major() {
        let m = from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(at(&m, 0, 1), 2.0);
        assert_eq!(at(&m, 2, 3), 12.0);
        assert_eq!(m * X_UNIT, DVec4::new(1.0, 5.0, 9.0, 13.0));
    }

    #[test]
    fn translate_moves_points_not_directions() {
        let m = translate(direction(1.0, 2.0, 3.0));
        assert_eq!(m * point(1.0, 1.0, 1.0), point(2.0, 3.0, 4.0));
        assert_eq!(m * X_UNIT, X_UNIT);
    }

    #[test]
    fn transform_forces_unit_w() {
        let m = translate(X_UNIT);
        assert_eq!(transform(&m, direction(0.0, 1.0, 0.0)), point(1.0, 1.0, 0.0));
    }

    #[test]
    fn rotate_quarter_turns() {
        assert!(close(rotate(90.0, Z_UNIT) * X_UNIT, Y_UNIT));
        assert!(close(rotate(-90.0, X_UNIT) * Y_UNIT, -Z_UNIT));
        assert!(close(rotate(-90.0, Z_UNIT) * X_UNIT, -Y_UNIT));
    }

    #[test]
    fn shear_leaves_diagonal_alone() {
        let m = shear(30.0, Y_UNIT, X_UNIT);
        assert!(close(m * point(0.0, 2.0, 0.0), point(1.0, 2.0, 0.0)));
        assert_eq!(at(&m, 0, 0), 1.0);
    }

    #[test]
    fn solve_recovers_rhs() {
        let a = rotate(35.0, Z_UNIT) * scale(2.0, 3.0, 4.0) * translate(direction(1.0, -1.0, 2.0));
        let x = point(0.5, -2.0, 7.0);
        let solved = solve(&a, a * x).expect("non-singular");
        assert!(close(solved, x));
    }

    #[test]
    fn solve_rejects_singular() {
        assert!(solve(&scale(1.0, 0.0, 1.0), X_UNIT).is_none());
    }
}
