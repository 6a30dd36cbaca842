//! Quaternion type.
//!
//! [`Quat`] is the compact rotation representation produced by
//! [`Mat3::to_quat`](crate::Mat3::to_quat) and
//! [`EulerAngles::to_quat`](crate::EulerAngles::to_quat).
//!
//! Components are ordered `(w, x, y, z)` in the constructor, scalar part
//! first. [`Quat::new`] stores its arguments verbatim; it never normalizes.
//!
//! ```rust
//! use rotkit_math::{Quat, Vec3};
//! use std::f32::consts::FRAC_PI_2;
//!
//! let q = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
//! let v = q * Vec3::X;
//! assert!((v - Vec3::Y).length() < 1e-6);
//! ```

use crate::{Mat3, Vec3};
use std::ops::{Mul, Neg};

/// A quaternion `w + xi + yj + zk`.
///
/// Rotation quaternions are expected to be unit length; `q` and `-q`
/// describe the same rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Quat {
    /// Scalar part
    pub w: f32,
    /// i component
    pub x: f32,
    /// j component
    pub y: f32,
    /// k component
    pub z: f32,
}

impl Quat {
    /// The identity rotation (1, 0, 0, 0).
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Creates a quaternion from `(w, x, y, z)`. No normalization.
    #[inline]
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// The axis is normalized first; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize();
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    /// Vector part `(x, y, z)`.
    #[inline]
    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Four-component dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Squared norm.
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Norm.
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Scales to unit length.
    ///
    /// A zero quaternion has no direction and is returned unchanged.
    /// Components are first divided by the largest magnitude, so very large
    /// or very small input does not overflow or underflow the length.
    pub fn normalize(self) -> Self {
        let max = self
            .w
            .abs()
            .max(self.x.abs())
            .max(self.y.abs())
            .max(self.z.abs());
        if max == 0.0 || !max.is_finite() {
            return self;
        }
        let q = Self::new(self.w / max, self.x / max, self.y / max, self.z / max);
        let inv = 1.0 / q.length();
        Self::new(q.w * inv, q.x * inv, q.y * inv, q.z * inv)
    }

    /// Conjugate `(w, -x, -y, -z)`; the inverse rotation for unit input.
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Rotation matrix of this quaternion.
    ///
    /// Scales by `2 / |q|^2`, so non-unit input still yields a proper
    /// rotation. The zero quaternion gives a non-finite matrix.
    pub fn to_mat3(self) -> Mat3 {
        let Self { w, x, y, z } = self;
        let s = 2.0 / self.length_squared();
        Mat3::from_cols(
            Vec3::new(
                1.0 - s * (y * y + z * z),
                s * (x * y + w * z),
                s * (x * z - w * y),
            ),
            Vec3::new(
                s * (x * y - w * z),
                1.0 - s * (x * x + z * z),
                s * (y * z + w * x),
            ),
            Vec3::new(
                s * (x * z + w * y),
                s * (y * z - w * x),
                1.0 - s * (x * x + y * y),
            ),
        )
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Converts to glam Quat.
    #[inline]
    pub fn to_glam(self) -> glam::Quat {
        glam::Quat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    /// Creates from glam Quat.
    #[inline]
    pub fn from_glam(q: glam::Quat) -> Self {
        Self::new(q.w, q.x, q.y, q.z)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Neg for Quat {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

// Hamilton product: (a * b) applies b first, then a.
impl Mul for Quat {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

// Rotates a vector; assumes a unit quaternion.
impl Mul<Vec3> for Quat {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        let u = self.xyz();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }
}

impl From<glam::Quat> for Quat {
    #[inline]
    fn from(q: glam::Quat) -> Self {
        Self::from_glam(q)
    }
}

impl From<Quat> for glam::Quat {
    #[inline]
    fn from(q: Quat) -> glam::Quat {
        q.to_glam()
    }
}
