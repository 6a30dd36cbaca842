//! 3x3 matrix type for rotations and linear maps.
//!
//! [`Mat3`] stores three **columns** `x`, `y`, `z`. Component names used in
//! this module read column first, row second: `yz` is row `z` of column `y`.
//!
//! # Convention
//!
//! Column vectors, so `M * v` combines the columns weighted by `v`:
//!
//! ```text
//! | xx yx zx |   | vx |
//! | xy yy zy | * | vy | = x * vx + y * vy + z * vz
//! | xz yz zz |   | vz |
//! ```
//!
//! `A * B` applies `B` first, then `A`.
//!
//! # Rotation extraction
//!
//! [`Mat3::to_quat`] and [`Mat3::to_euler`] first project the matrix onto the
//! nearest rotation with [`Mat3::orthonormalize`], then apply closed-form
//! extraction. Both refuse matrices with `det() <= 0`.
//!
//! ```rust
//! use rotkit_math::{EulerOrder, Mat3};
//!
//! let r = Mat3::from_rotation_z(0.5) * Mat3::from_rotation_x(0.25);
//! let e = r.to_euler(EulerOrder::ZYX).unwrap();
//! assert!((e.z - 0.5).abs() < 1e-5);
//! assert!((e.x - 0.25).abs() < 1e-5);
//! ```

use crate::{EulerAngles, EulerOrder, Quat, RotationError, RotationResult, Vec3};
use std::ops::{Add, Div, Index, Mul, Neg, Sub};
use tracing::{debug, trace};

/// Iteration cap for [`Mat3::orthonormalize`].
const ORTHONORMALIZE_MAX_ITERATIONS: usize = 100;

/// `|det|` at or below this stops [`Mat3::orthonormalize`].
const ORTHONORMALIZE_DET_TOLERANCE: f32 = 1.0000001;

/// A 3x3 matrix of `f32`, stored as three columns.
///
/// Plain value type: every operation returns a new matrix, equality is
/// component-wise.
///
/// # Example
///
/// ```rust
/// use rotkit_math::{Mat3, Vec3};
///
/// let identity = Mat3::IDENTITY;
/// let v = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(identity * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat3 {
    /// First column (image of the X axis)
    pub x: Vec3,
    /// Second column (image of the Y axis)
    pub y: Vec3,
    /// Third column (image of the Z axis)
    pub z: Vec3,
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self::from_cols(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);

    /// Identity matrix.
    pub const IDENTITY: Self = Self::from_cols(Vec3::X, Vec3::Y, Vec3::Z);

    /// Creates a matrix from its columns.
    #[inline]
    pub const fn from_cols(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self { x, y, z }
    }

    /// Creates a matrix from its rows.
    #[inline]
    pub const fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self::from_cols(
            Vec3::new(r0.x, r1.x, r2.x),
            Vec3::new(r0.y, r1.y, r2.y),
            Vec3::new(r0.z, r1.z, r2.z),
        )
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub const fn from_cols_array(cols: [[f32; 3]; 3]) -> Self {
        Self::from_cols(
            Vec3::from_array(cols[0]),
            Vec3::from_array(cols[1]),
            Vec3::from_array(cols[2]),
        )
    }

    /// Creates a matrix from row arrays, the way matrices are written on paper.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotkit_math::{Mat3, Vec3};
    ///
    /// let m = Mat3::from_rows_array([
    ///     [1.0, 2.0, 3.0],
    ///     [4.0, 5.0, 6.0],
    ///     [7.0, 8.0, 9.0],
    /// ]);
    /// assert_eq!(m.row(0), Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(m.col(0), Vec3::new(1.0, 4.0, 7.0));
    /// ```
    #[inline]
    pub const fn from_rows_array(rows: [[f32; 3]; 3]) -> Self {
        Self::from_rows(
            Vec3::from_array(rows[0]),
            Vec3::from_array(rows[1]),
            Vec3::from_array(rows[2]),
        )
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f32, d1: f32, d2: f32) -> Self {
        Self::from_cols(
            Vec3::new(d0, 0.0, 0.0),
            Vec3::new(0.0, d1, 0.0),
            Vec3::new(0.0, 0.0, d2),
        )
    }

    /// Creates a uniform scale matrix.
    #[inline]
    pub const fn scale(s: f32) -> Self {
        Self::diagonal(s, s, s)
    }

    /// Right-handed rotation of `angle` radians about the X axis.
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(Vec3::X, Vec3::new(0.0, c, s), Vec3::new(0.0, -s, c))
    }

    /// Right-handed rotation of `angle` radians about the Y axis.
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(Vec3::new(c, 0.0, -s), Vec3::Y, Vec3::new(s, 0.0, c))
    }

    /// Right-handed rotation of `angle` radians about the Z axis.
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(Vec3::new(c, s, 0.0), Vec3::new(-s, c, 0.0), Vec3::Z)
    }

    /// Rotation matrix of a quaternion. See [`Quat::to_mat3`].
    #[inline]
    pub fn from_quat(q: Quat) -> Self {
        q.to_mat3()
    }

    /// Rotation matrix of a set of Euler angles. See [`EulerAngles::to_mat3`].
    #[inline]
    pub fn from_euler(angles: EulerAngles) -> Self {
        angles.to_mat3()
    }

    /// Returns a column as Vec3.
    ///
    /// # Panics
    ///
    /// Panics if `i > 2`.
    #[inline]
    pub fn col(&self, i: usize) -> Vec3 {
        self[i]
    }

    /// Returns a row as Vec3.
    ///
    /// # Panics
    ///
    /// Panics if `i > 2`.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::new(self.x[i], self.y[i], self.z[i])
    }

    /// Column arrays `[x, y, z]`.
    #[inline]
    pub const fn to_cols_array(&self) -> [[f32; 3]; 3] {
        [self.x.to_array(), self.y.to_array(), self.z.to_array()]
    }

    /// Row arrays, the inverse of [`Mat3::from_rows_array`].
    #[inline]
    pub fn to_rows_array(&self) -> [[f32; 3]; 3] {
        [self.row(0).to_array(), self.row(1).to_array(), self.row(2).to_array()]
    }

    /// Returns the transpose of this matrix.
    ///
    /// Pure relabeling: `m.transpose().transpose() == m` exactly.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_rows(self.x, self.y, self.z)
    }

    /// Computes the determinant.
    #[inline]
    pub fn det(&self) -> f32 {
        let (xx, xy, xz) = (self.x.x, self.x.y, self.x.z);
        let (yx, yy, yz) = (self.y.x, self.y.y, self.y.z);
        let (zx, zy, zz) = (self.z.x, self.z.y, self.z.z);
        (xz * yx - xx * yz) * zy + (xx * yy - xy * yx) * zz + (xy * yz - xz * yy) * zx
    }

    /// Sum of the diagonal.
    #[inline]
    pub fn trace(&self) -> f32 {
        self.x.x + self.y.y + self.z.z
    }

    /// Squared Frobenius norm (sum of squares of all nine components).
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.x.length_squared() + self.y.length_squared() + self.z.length_squared()
    }

    /// Frobenius norm.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Cofactor matrix as columns: `[y × z, z × x, x × y]`.
    #[inline]
    fn cofactor_cols(&self) -> [Vec3; 3] {
        [
            self.y.cross(self.z),
            self.z.cross(self.x),
            self.x.cross(self.y),
        ]
    }

    /// Inverse via the adjugate: cofactors transposed, each divided by
    /// [`det`](Self::det).
    ///
    /// A singular matrix is not detected: the result is NaN/Inf, the same as
    /// any other floating-point division by zero. See
    /// [`try_inverse`](Self::try_inverse) for a checked version.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotkit_math::Mat3;
    ///
    /// let m = Mat3::scale(2.0);
    /// assert_eq!(m.inv(), Mat3::scale(0.5));
    /// ```
    pub fn inv(&self) -> Self {
        let det = self.det();
        let [cx, cy, cz] = self.cofactor_cols();
        Self::from_rows(cx / det, cy / det, cz / det)
    }

    /// Transpose of the inverse, built directly from the cofactors.
    ///
    /// Bit-identical to `self.inv().transpose()`.
    pub fn inv_transpose(&self) -> Self {
        let det = self.det();
        let [cx, cy, cz] = self.cofactor_cols();
        Self::from_cols(cx / det, cy / det, cz / det)
    }

    /// Checked inverse.
    ///
    /// Returns `None` if the determinant is exactly zero or the inverse has
    /// non-finite components.
    pub fn try_inverse(&self) -> Option<Self> {
        if self.det() == 0.0 {
            return None;
        }
        let inv = self.inv();
        inv.is_finite().then_some(inv)
    }

    /// Transforms a Vec3 by this matrix.
    ///
    /// Equivalent to `matrix * vector`.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Multiplies two matrices: `self * other`, applying `other` first.
    #[inline]
    pub fn mul_mat(&self, other: &Self) -> Self {
        Self::from_cols(
            self.transform(other.x),
            self.transform(other.y),
            self.transform(other.z),
        )
    }

    /// Component-wise linear interpolation.
    ///
    /// Computed as `self * (1 - t) + other * t`, so both endpoints are
    /// reproduced exactly.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        *self * (1.0 - t) + *other * t
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Projects onto the nearest rotation matrix (orthonormal, `det = +1`).
    ///
    /// Newton iteration towards the orthogonal polar factor:
    ///
    /// ```text
    /// M' = (M + M^-T) / 2
    /// ```
    ///
    /// Stops as soon as `|det(M')| <= 1.0000001`, or when `|det|` no longer
    /// decreases, or after 100 steps; the last iterate is returned in every
    /// case. Input with `det <= 0` or a singular input gives meaningless
    /// output, not an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotkit_math::Mat3;
    ///
    /// let skewed = Mat3::from_rows_array([
    ///     [1.0, 0.1, 0.0],
    ///     [0.0, 1.0, 0.0],
    ///     [0.0, 0.0, 1.0],
    /// ]);
    /// let r = skewed.orthonormalize();
    /// assert!((r.det() - 1.0).abs() < 1e-5);
    /// ```
    pub fn orthonormalize(&self) -> Self {
        let mut current = *self;
        let mut prev_det = f32::INFINITY;
        for iteration in 1..=ORTHONORMALIZE_MAX_ITERATIONS {
            let next = (current + current.inv_transpose()) / 2.0;
            let det = next.det().abs();
            if orthonormalize_should_stop(det, prev_det) {
                trace!(iteration, det, "orthonormalize converged");
                return next;
            }
            prev_det = det;
            current = next;
        }
        debug!(
            iterations = ORTHONORMALIZE_MAX_ITERATIONS,
            det = current.det(),
            "orthonormalize hit iteration cap"
        );
        current
    }

    /// Rejects matrices that cannot hold a rotation.
    fn check_orientation_preserving(&self) -> RotationResult<()> {
        let det = self.det();
        if det.is_nan() || det <= 0.0 {
            debug!(det, "refusing rotation extraction");
            return Err(RotationError::not_orientation_preserving(det));
        }
        Ok(())
    }

    /// Quaternion of a matrix already known to be a rotation.
    ///
    /// Skips [`orthonormalize`](Self::orthonormalize); only the determinant
    /// sign is checked. Uses the branch on the largest diagonal term to
    /// avoid cancellation, then normalizes the result to unit length.
    ///
    /// # Errors
    ///
    /// [`RotationError::NotOrientationPreserving`] if `det() <= 0`.
    pub fn to_quat_assuming_orthonormal(&self) -> RotationResult<Quat> {
        self.check_orientation_preserving()?;

        let (xx, xy, xz) = (self.x.x, self.x.y, self.x.z);
        let (yx, yy, yz) = (self.y.x, self.y.y, self.y.z);
        let (zx, zy, zz) = (self.z.x, self.z.y, self.z.z);

        // Each branch yields the quaternion scaled by 4 times its largest
        // component, which is positive.
        let q = if yy > -zz && zz > -xx && xx > -yy {
            Quat::new(1.0 + xx + yy + zz, yz - zy, zx - xz, xy - yx)
        } else if xx > yy && xx > zz {
            Quat::new(yz - zy, 1.0 + xx - yy - zz, xy + yx, zx + xz)
        } else if yy > zz {
            Quat::new(zx - xz, xy + yx, 1.0 - xx + yy - zz, yz + zy)
        } else {
            Quat::new(xy - yx, zx + xz, yz + zy, 1.0 - xx - yy + zz)
        };
        Ok(q.normalize())
    }

    /// Unit quaternion of the rotation nearest to this matrix.
    ///
    /// # Errors
    ///
    /// [`RotationError::NotOrientationPreserving`] if `det() <= 0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotkit_math::{Mat3, Quat};
    ///
    /// assert_eq!(Mat3::IDENTITY.to_quat().unwrap(), Quat::IDENTITY);
    /// assert!(Mat3::diagonal(-1.0, 1.0, 1.0).to_quat().is_err());
    /// ```
    pub fn to_quat(&self) -> RotationResult<Quat> {
        self.check_orientation_preserving()?;
        self.orthonormalize().to_quat_assuming_orthonormal()
    }

    /// Euler angles of a matrix already known to be a rotation.
    ///
    /// Skips [`orthonormalize`](Self::orthonormalize); only the determinant
    /// sign is checked.
    ///
    /// # Errors
    ///
    /// [`RotationError::NotOrientationPreserving`] if `det() <= 0`.
    pub fn to_euler_assuming_orthonormal(&self, order: EulerOrder) -> RotationResult<EulerAngles> {
        self.check_orientation_preserving()?;
        Ok(EulerAngles::from_rotation(self, order))
    }

    /// Euler angles, in the given order, of the rotation nearest to this
    /// matrix.
    ///
    /// Angles come straight from `atan2`: the outer two lie in `[-π, π]`,
    /// the middle one in `[-π/2, π/2]`.
    ///
    /// # Errors
    ///
    /// [`RotationError::NotOrientationPreserving`] if `det() <= 0`.
    pub fn to_euler(&self, order: EulerOrder) -> RotationResult<EulerAngles> {
        self.check_orientation_preserving()?;
        self.orthonormalize().to_euler_assuming_orthonormal(order)
    }

    /// Converts to glam Mat3 (also column-major).
    #[inline]
    pub fn to_glam(&self) -> glam::Mat3 {
        glam::Mat3::from_cols(self.x.to_glam(), self.y.to_glam(), self.z.to_glam())
    }

    /// Creates from glam Mat3.
    #[inline]
    pub fn from_glam(m: glam::Mat3) -> Self {
        Self::from_cols(m.x_axis.into(), m.y_axis.into(), m.z_axis.into())
    }
}

/// Stop rule for [`Mat3::orthonormalize`]: `|det|` is within tolerance of 1,
/// or it did not shrink since the previous step. NaN never stops.
#[inline]
fn orthonormalize_should_stop(det: f32, prev_det: f32) -> bool {
    det <= ORTHONORMALIZE_DET_TOLERANCE || det >= prev_det
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn index(&self, i: usize) -> &Vec3 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Mat3 column index out of bounds: {}", i),
        }
    }
}

impl Neg for Mat3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_cols(-self.x, -self.y, -self.z)
    }
}

impl Add for Mat3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_cols(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Mat3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_cols(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// Mat3 * f32
impl Mul<f32> for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::from_cols(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// f32 * Mat3
impl Mul<Mat3> for f32 {
    type Output = Mat3;

    #[inline]
    fn mul(self, rhs: Mat3) -> Mat3 {
        rhs * self
    }
}

// Mat3 / f32, as multiplication by the reciprocal
impl Div<f32> for Mat3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        self * (1.0 / rhs)
    }
}

// Mat3 * Vec3
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

// Mat3 * Mat3
impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

// Right division: A / B = A * B^-1
impl Div for Mat3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inv()
    }
}

// f32 / Mat3 = M^-1 * s
impl Div<Mat3> for f32 {
    type Output = Mat3;

    #[inline]
    fn div(self, rhs: Mat3) -> Mat3 {
        rhs.inv() * self
    }
}

impl From<glam::Mat3> for Mat3 {
    #[inline]
    fn from(m: glam::Mat3) -> Self {
        Self::from_glam(m)
    }
}

impl From<Mat3> for glam::Mat3 {
    #[inline]
    fn from(m: Mat3) -> glam::Mat3 {
        m.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mat3 {
        Mat3::from_rows_array([
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 4.0],
            [5.0, 6.0, 0.0],
        ])
    }

    fn assert_close(a: &Mat3, b: &Mat3, eps: f32) {
        let (a, b) = (a.to_cols_array(), b.to_cols_array());
        for c in 0..3 {
            for r in 0..3 {
                assert!(
                    (a[c][r] - b[c][r]).abs() < eps,
                    "col {c} row {r}: {} vs {}",
                    a[c][r],
                    b[c][r]
                );
            }
        }
    }

    #[test]
    fn test_mat3_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Mat3::IDENTITY * v, v);
        assert_eq!(Mat3::default(), Mat3::IDENTITY);
    }

    #[test]
    fn test_mat3_rows_and_cols() {
        let m = sample();
        assert_eq!(m.row(2), Vec3::new(5.0, 6.0, 0.0));
        assert_eq!(m.col(2), Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(m.z, m.col(2));
        assert_eq!(Mat3::from_rows_array(m.to_rows_array()), m);
        assert_eq!(Mat3::from_cols_array(m.to_cols_array()), m);
    }

    #[test]
    fn test_mat3_transform_uses_rows() {
        let m = sample();
        let v = Vec3::new(1.0, -1.0, 2.0);
        let expected = Vec3::new(m.row(0).dot(v), m.row(1).dot(v), m.row(2).dot(v));
        assert_eq!(m * v, expected);
    }

    #[test]
    fn test_mat3_transpose() {
        let m = sample();
        let t = m.transpose();
        assert_eq!(t.row(0), m.col(0));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_mat3_determinant() {
        assert!((sample().det() - 1.0).abs() < 1e-6);
        assert_eq!(Mat3::diagonal(2.0, 3.0, 4.0).det(), 24.0);
        assert_eq!(Mat3::diagonal(-1.0, 1.0, 1.0).det(), -1.0);
    }

    #[test]
    fn test_mat3_trace_and_norm() {
        let m = sample();
        assert_eq!(m.trace(), 2.0);
        assert_eq!(m.norm_squared(), 92.0);
        assert!((m.norm() - 92.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_mat3_inverse() {
        let m = sample();
        assert_close(&(m * m.inv()), &Mat3::IDENTITY, 1e-5);
        assert_close(&(m.inv() * m), &Mat3::IDENTITY, 1e-5);
    }

    #[test]
    fn test_mat3_inv_transpose_bit_exact() {
        let m = Mat3::from_rows_array([
            [0.3, -1.7, 2.2],
            [4.1, 0.9, -0.6],
            [-2.5, 1.3, 0.8],
        ]);
        assert_eq!(m.inv_transpose(), m.inv().transpose());
    }

    #[test]
    fn test_mat3_singular() {
        let m = Mat3::from_rows_array([
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 6.0], // Row 2 = 2 * Row 1
            [1.0, 1.0, 1.0],
        ]);
        assert_eq!(m.det(), 0.0);
        assert!(m.try_inverse().is_none());
        assert!(!m.inv().is_finite());
        assert!(sample().try_inverse().is_some());
    }

    #[test]
    fn test_mat3_scalar_ops() {
        let m = sample();
        assert_eq!(m * 2.0, 2.0 * m);
        assert_eq!(m / 4.0, m * 0.25);
        assert_eq!(-m, m * -1.0);
        assert_eq!(m + m, m * 2.0);
        assert_eq!(m - m, Mat3::ZERO);
        let inf = m / 0.0;
        assert!(!inf.is_finite());
    }

    #[test]
    fn test_mat3_division() {
        let a = sample();
        let b = Mat3::from_rotation_y(0.3) * Mat3::diagonal(1.0, 2.0, 0.5);
        assert_eq!(a / b, a * b.inv());
        assert_eq!(3.0 / b, b.inv() * 3.0);
        assert_close(&((a / b) * b), &a, 1e-4);
    }

    #[test]
    fn test_mat3_mul_mat() {
        let a = Mat3::scale(2.0);
        let b = Mat3::scale(3.0);
        assert_eq!(a * b, Mat3::scale(6.0));

        let rz = Mat3::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let rx = Mat3::from_rotation_x(std::f32::consts::FRAC_PI_2);
        // rx first: Y -> Z, then rz leaves Z alone
        let v = (rz * rx) * Vec3::Y;
        assert!((v - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_mat3_elementary_rotations() {
        let a = std::f32::consts::FRAC_PI_2;
        assert!((Mat3::from_rotation_x(a) * Vec3::Y - Vec3::Z).length() < 1e-6);
        assert!((Mat3::from_rotation_y(a) * Vec3::Z - Vec3::X).length() < 1e-6);
        assert!((Mat3::from_rotation_z(a) * Vec3::X - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_mat3_lerp() {
        let a = sample();
        let b = Mat3::diagonal(2.0, 4.0, 6.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), (a + b) / 2.0);
    }

    #[test]
    fn test_orthonormalize_rotation_is_fixed_point() {
        let r = Mat3::from_rotation_z(0.4) * Mat3::from_rotation_x(-1.1);
        assert_close(&r.orthonormalize(), &r, 1e-5);
    }

    #[test]
    fn test_orthonormalize_identity_exact() {
        assert_eq!(Mat3::IDENTITY.orthonormalize(), Mat3::IDENTITY);
    }

    #[test]
    fn test_orthonormalize_removes_scale() {
        assert_close(&Mat3::scale(3.0).orthonormalize(), &Mat3::IDENTITY, 1e-5);
        assert_close(
            &Mat3::diagonal(0.2, 5.0, 1.0).orthonormalize(),
            &Mat3::IDENTITY,
            1e-5,
        );
    }

    #[test]
    fn test_orthonormalize_skewed() {
        let m = Mat3::from_rows_array([
            [0.9, 0.3, -0.1],
            [-0.2, 1.1, 0.05],
            [0.15, 0.0, 0.8],
        ]);
        let r = m.orthonormalize();
        assert!((r.det() - 1.0).abs() < 1e-5);
        assert_close(&(r * r.transpose()), &Mat3::IDENTITY, 1e-5);
    }

    #[test]
    fn test_orthonormalize_stop_rule() {
        assert!(orthonormalize_should_stop(1.0, f32::INFINITY));
        assert!(orthonormalize_should_stop(ORTHONORMALIZE_DET_TOLERANCE, 5.0));
        assert!(!orthonormalize_should_stop(1.5, 2.0));
        // A stalled determinant stops the iteration, ties included.
        assert!(orthonormalize_should_stop(1.5, 1.5));
        assert!(orthonormalize_should_stop(1.6, 1.5));
        assert!(!orthonormalize_should_stop(f32::NAN, f32::INFINITY));
    }

    #[test]
    fn test_orthonormalize_singular_runs_to_cap() {
        // det = 0: every step divides by zero, NaN never stops the loop.
        let r = Mat3::diagonal(1.0, 1.0, 0.0).orthonormalize();
        assert!(!r.is_finite());
    }

    #[test]
    fn test_to_quat_identity() {
        assert_eq!(Mat3::IDENTITY.to_quat().unwrap(), Quat::IDENTITY);
        assert_eq!(
            Mat3::IDENTITY.to_quat_assuming_orthonormal().unwrap(),
            Quat::IDENTITY
        );
    }

    #[test]
    fn test_to_quat_branches() {
        // Half turns exercise the x, y and z branches; a small rotation the w one.
        let cases = [
            (Vec3::X, std::f32::consts::PI),
            (Vec3::Y, std::f32::consts::PI),
            (Vec3::Z, std::f32::consts::PI),
            (Vec3::new(1.0, -2.0, 0.5), 0.3),
            (Vec3::new(-0.3, 0.2, 1.0), 2.9),
        ];
        for (axis, angle) in cases {
            let expected = Quat::from_axis_angle(axis, angle);
            let q = expected.to_mat3().to_quat().unwrap();
            assert!(q.dot(expected).abs() > 1.0 - 1e-5, "{axis:?} {angle}: {q:?}");
        }
    }

    #[test]
    fn test_to_quat_rejects_reflection() {
        let mirror = Mat3::diagonal(-1.0, 1.0, 1.0);
        let err = mirror.to_quat().unwrap_err();
        assert_eq!(err, RotationError::NotOrientationPreserving { det: -1.0 });
        assert!(mirror.to_quat_assuming_orthonormal().is_err());
        assert!(Mat3::ZERO.to_quat().is_err());
    }

    #[test]
    fn test_to_euler_rejects_reflection() {
        let mirror = Mat3::diagonal(1.0, 1.0, -1.0);
        for order in EulerOrder::ALL {
            assert!(mirror.to_euler(order).unwrap_err().is_orientation_error());
            assert!(mirror.to_euler_assuming_orthonormal(order).is_err());
        }
    }

    #[test]
    fn test_to_euler_rejects_nan() {
        let mut m = Mat3::IDENTITY;
        m.x.x = f32::NAN;
        assert!(m.to_euler(EulerOrder::XYZ).is_err());
        assert!(m.to_quat().is_err());
    }

    #[test]
    fn test_mat3_glam_interop() {
        let m = sample();
        let g: glam::Mat3 = m.into();
        assert_eq!(g.x_axis, glam::Vec3::new(1.0, 0.0, 5.0));
        assert_eq!(Mat3::from(g), m);
    }
}
