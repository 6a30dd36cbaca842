//! Euler angle rotations.
//!
//! An [`EulerAngles`] value is an [`EulerOrder`] plus three angles in
//! radians, one per axis. The order names the axes left to right as they
//! appear in the matrix product:
//!
//! ```text
//! XYZ:  M = Rx(x) * Ry(y) * Rz(z)
//! ZYX:  M = Rz(z) * Ry(y) * Rx(x)
//! ```
//!
//! i.e. intrinsic rotations about the first axis, then the (rotated) second,
//! then the third. The angle stored in field `x` is always the rotation
//! about X, whatever position X takes in the order.
//!
//! Angles are not wrapped or normalized.
//!
//! # Usage
//!
//! ```rust
//! use rotkit_math::{EulerAngles, EulerOrder};
//!
//! let e = EulerAngles::from_degrees(EulerOrder::ZYX, 10.0, 20.0, 30.0);
//! let m = e.to_mat3();
//! let back = m.to_euler(EulerOrder::ZYX).unwrap();
//! assert!((back.y - e.y).abs() < 1e-5);
//! ```

use crate::{Mat3, Quat, RotationError};
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

/// The six Tait-Bryan axis orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EulerOrder {
    /// `Rx * Ry * Rz`
    #[default]
    XYZ,
    /// `Ry * Rz * Rx`
    YZX,
    /// `Rz * Rx * Ry`
    ZXY,
    /// `Rz * Ry * Rx`
    ZYX,
    /// `Ry * Rx * Rz`
    YXZ,
    /// `Rx * Rz * Ry`
    XZY,
}

impl EulerOrder {
    /// All six orders.
    pub const ALL: [EulerOrder; 6] = [
        EulerOrder::XYZ,
        EulerOrder::YZX,
        EulerOrder::ZXY,
        EulerOrder::ZYX,
        EulerOrder::YXZ,
        EulerOrder::XZY,
    ];

    /// Upper-case name, e.g. `"ZYX"`.
    pub const fn name(self) -> &'static str {
        match self {
            EulerOrder::XYZ => "XYZ",
            EulerOrder::YZX => "YZX",
            EulerOrder::ZXY => "ZXY",
            EulerOrder::ZYX => "ZYX",
            EulerOrder::YXZ => "YXZ",
            EulerOrder::XZY => "XZY",
        }
    }
}

impl fmt::Display for EulerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EulerOrder {
    type Err = RotationError;

    /// Case-insensitive: `"zyx"` and `"ZYX"` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        EulerOrder::ALL
            .into_iter()
            .find(|order| order.name() == upper)
            .ok_or_else(|| RotationError::UnknownEulerOrder(s.to_string()))
    }
}

/// Three rotation angles (radians) applied in a given [`EulerOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EulerAngles {
    /// Axis order
    pub order: EulerOrder,
    /// Rotation about X
    pub x: f32,
    /// Rotation about Y
    pub y: f32,
    /// Rotation about Z
    pub z: f32,
}

impl EulerAngles {
    /// Creates Euler angles from radians.
    #[inline]
    pub const fn new(order: EulerOrder, x: f32, y: f32, z: f32) -> Self {
        Self { order, x, y, z }
    }

    /// Creates Euler angles from degrees.
    #[inline]
    pub fn from_degrees(order: EulerOrder, x: f32, y: f32, z: f32) -> Self {
        Self::new(order, x.to_radians(), y.to_radians(), z.to_radians())
    }

    /// Angles `[x, y, z]` in degrees.
    #[inline]
    pub fn to_degrees(&self) -> [f32; 3] {
        [self.x.to_degrees(), self.y.to_degrees(), self.z.to_degrees()]
    }

    /// Quaternion of this rotation, built from half-angle sines and cosines.
    ///
    /// Not renormalized: the result is unit length up to rounding.
    pub fn to_quat(&self) -> Quat {
        let (s1, c1) = (self.x * 0.5).sin_cos();
        let (s2, c2) = (self.y * 0.5).sin_cos();
        let (s3, c3) = (self.z * 0.5).sin_cos();

        match self.order {
            EulerOrder::XYZ => Quat::new(
                c1 * c2 * c3 - s1 * s2 * s3,
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
            ),
            EulerOrder::YZX => Quat::new(
                c1 * c2 * c3 - s1 * s2 * s3,
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
            ),
            EulerOrder::ZXY => Quat::new(
                c1 * c2 * c3 - s1 * s2 * s3,
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
            ),
            EulerOrder::ZYX => Quat::new(
                c1 * c2 * c3 + s1 * s2 * s3,
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
            ),
            EulerOrder::YXZ => Quat::new(
                c1 * c2 * c3 + s1 * s2 * s3,
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
            ),
            EulerOrder::XZY => Quat::new(
                c1 * c2 * c3 + s1 * s2 * s3,
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
            ),
        }
    }

    /// Rotation matrix, the hand-expanded product of the three elementary
    /// rotations in this order.
    pub fn to_mat3(&self) -> Mat3 {
        let (b, a) = self.x.sin_cos();
        let (d, c) = self.y.sin_cos();
        let (f, e) = self.z.sin_cos();

        let rows = match self.order {
            EulerOrder::XYZ => {
                let (ae, af, be, bf) = (a * e, a * f, b * e, b * f);
                [
                    [c * e, -c * f, d],
                    [af + be * d, ae - bf * d, -b * c],
                    [bf - ae * d, be + af * d, a * c],
                ]
            }
            EulerOrder::YXZ => {
                let (ce, cf, de, df) = (c * e, c * f, d * e, d * f);
                [
                    [ce + df * b, de * b - cf, a * d],
                    [a * f, a * e, -b],
                    [cf * b - de, df + ce * b, a * c],
                ]
            }
            EulerOrder::ZXY => {
                let (ce, cf, de, df) = (c * e, c * f, d * e, d * f);
                [
                    [ce - df * b, -a * f, de + cf * b],
                    [cf + de * b, a * e, df - ce * b],
                    [-a * d, b, a * c],
                ]
            }
            EulerOrder::ZYX => {
                let (ae, af, be, bf) = (a * e, a * f, b * e, b * f);
                [
                    [c * e, be * d - af, ae * d + bf],
                    [c * f, bf * d + ae, af * d - be],
                    [-d, b * c, a * c],
                ]
            }
            EulerOrder::YZX => {
                let (ac, ad, bc, bd) = (a * c, a * d, b * c, b * d);
                [
                    [c * e, bd - ac * f, bc * f + ad],
                    [f, a * e, -b * e],
                    [-d * e, ad * f + bc, ac - bd * f],
                ]
            }
            EulerOrder::XZY => {
                let (ac, ad, bc, bd) = (a * c, a * d, b * c, b * d);
                [
                    [c * e, -f, d * e],
                    [ac * f + bd, a * e, ad * f - bc],
                    [bc * f - ad, b * e, bd * f + ac],
                ]
            }
        };
        Mat3::from_rows_array(rows)
    }

    /// Decomposes a rotation matrix. No determinant check, no
    /// orthonormalization; callers go through [`Mat3::to_euler`].
    ///
    /// `kc` is the squared cosine of the middle angle. When it is exactly
    /// zero the first and third axes coincide: the third angle is pinned
    /// to 0 and the middle one to ±π/2.
    pub(crate) fn from_rotation(m: &Mat3, order: EulerOrder) -> Self {
        let (xx, xy, xz) = (m.x.x, m.x.y, m.x.z);
        let (yx, yy, yz) = (m.y.x, m.y.y, m.y.z);
        let (zx, zy, zz) = (m.z.x, m.z.y, m.z.z);

        match order {
            EulerOrder::XYZ => {
                let kc = zy * zy + zz * zz;
                if kc == 0.0 {
                    Self::new(order, yz.atan2(yy), FRAC_PI_2.copysign(zx), 0.0)
                } else {
                    Self::new(
                        order,
                        (-zy).atan2(zz),
                        zx.atan2(kc.sqrt()),
                        (-yx).atan2(xx),
                    )
                }
            }
            EulerOrder::YXZ => {
                let kc = zx * zx + zz * zz;
                if kc == 0.0 {
                    Self::new(order, FRAC_PI_2.copysign(-zy), (-xz).atan2(xx), 0.0)
                } else {
                    Self::new(
                        order,
                        (-zy).atan2(kc.sqrt()),
                        zx.atan2(zz),
                        xy.atan2(yy),
                    )
                }
            }
            EulerOrder::ZXY => {
                let kc = yx * yx + yy * yy;
                if kc == 0.0 {
                    Self::new(order, FRAC_PI_2.copysign(yz), 0.0, xy.atan2(xx))
                } else {
                    Self::new(
                        order,
                        yz.atan2(kc.sqrt()),
                        (-xz).atan2(zz),
                        (-yx).atan2(yy),
                    )
                }
            }
            EulerOrder::ZYX => {
                let kc = xx * xx + xy * xy;
                if kc == 0.0 {
                    Self::new(order, 0.0, FRAC_PI_2.copysign(-xz), (-yx).atan2(yy))
                } else {
                    Self::new(
                        order,
                        yz.atan2(zz),
                        (-xz).atan2(kc.sqrt()),
                        xy.atan2(xx),
                    )
                }
            }
            EulerOrder::YZX => {
                let kc = xx * xx + xz * xz;
                if kc == 0.0 {
                    Self::new(order, 0.0, zx.atan2(zz), FRAC_PI_2.copysign(xy))
                } else {
                    Self::new(
                        order,
                        (-zy).atan2(yy),
                        (-xz).atan2(xx),
                        xy.atan2(kc.sqrt()),
                    )
                }
            }
            EulerOrder::XZY => {
                let kc = yy * yy + yz * yz;
                if kc == 0.0 {
                    Self::new(order, (-zy).atan2(zz), 0.0, FRAC_PI_2.copysign(-yx))
                } else {
                    Self::new(
                        order,
                        yz.atan2(yy),
                        zx.atan2(xx),
                        (-yx).atan2(kc.sqrt()),
                    )
                }
            }
        }
    }
}

impl From<EulerAngles> for Quat {
    #[inline]
    fn from(e: EulerAngles) -> Quat {
        e.to_quat()
    }
}

impl From<EulerAngles> for Mat3 {
    #[inline]
    fn from(e: EulerAngles) -> Mat3 {
        e.to_mat3()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Product of the elementary rotations, left to right in `order`.
    fn composed(e: &EulerAngles) -> Mat3 {
        let (rx, ry, rz) = (
            Mat3::from_rotation_x(e.x),
            Mat3::from_rotation_y(e.y),
            Mat3::from_rotation_z(e.z),
        );
        match e.order {
            EulerOrder::XYZ => rx * ry * rz,
            EulerOrder::YZX => ry * rz * rx,
            EulerOrder::ZXY => rz * rx * ry,
            EulerOrder::ZYX => rz * ry * rx,
            EulerOrder::YXZ => ry * rx * rz,
            EulerOrder::XZY => rx * rz * ry,
        }
    }

    /// Angles with the first axis at `first`, the middle at `middle`, the third at 0.
    fn first_and_middle(order: EulerOrder, first: f32, middle: f32) -> EulerAngles {
        match order {
            EulerOrder::XYZ => EulerAngles::new(order, first, middle, 0.0),
            EulerOrder::YXZ => EulerAngles::new(order, middle, first, 0.0),
            EulerOrder::ZXY => EulerAngles::new(order, middle, 0.0, first),
            EulerOrder::ZYX => EulerAngles::new(order, 0.0, middle, first),
            EulerOrder::YZX => EulerAngles::new(order, 0.0, first, middle),
            EulerOrder::XZY => EulerAngles::new(order, first, 0.0, middle),
        }
    }

    fn max_diff(a: &Mat3, b: &Mat3) -> f32 {
        let (a, b) = (a.to_cols_array(), b.to_cols_array());
        a.iter()
            .flatten()
            .zip(b.iter().flatten())
            .map(|(p, q)| (p - q).abs())
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_order_parse_and_display() {
        for order in EulerOrder::ALL {
            assert_eq!(order.to_string().parse::<EulerOrder>().unwrap(), order);
        }
        assert_eq!("zyx".parse::<EulerOrder>().unwrap(), EulerOrder::ZYX);
        assert_eq!(" yXz ".parse::<EulerOrder>().unwrap(), EulerOrder::YXZ);
        assert_eq!(
            "XXY".parse::<EulerOrder>(),
            Err(RotationError::UnknownEulerOrder("XXY".into()))
        );
        assert_eq!(EulerOrder::default(), EulerOrder::XYZ);
    }

    #[test]
    fn test_degrees() {
        let e = EulerAngles::from_degrees(EulerOrder::XYZ, 90.0, -45.0, 180.0);
        assert!((e.x - FRAC_PI_2).abs() < 1e-6);
        let [x, y, z] = e.to_degrees();
        assert!((x - 90.0).abs() < 1e-4);
        assert!((y + 45.0).abs() < 1e-4);
        assert!((z - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_to_mat3_matches_elementary_product() {
        for order in EulerOrder::ALL {
            let e = EulerAngles::new(order, 0.4, -1.2, 2.5);
            let diff = max_diff(&e.to_mat3(), &composed(&e));
            assert!(diff < 1e-5, "{order}: {diff}");
        }
    }

    #[test]
    fn test_to_quat_matches_to_mat3() {
        for order in EulerOrder::ALL {
            let e = EulerAngles::new(order, -0.7, 0.3, 1.9);
            let q = e.to_quat();
            assert!((q.length() - 1.0).abs() < 1e-6);
            let diff = max_diff(&q.to_mat3(), &e.to_mat3());
            assert!(diff < 1e-5, "{order}: {diff}");
        }
    }

    #[test]
    fn test_zero_angles_are_identity() {
        for order in EulerOrder::ALL {
            let e = EulerAngles::new(order, 0.0, 0.0, 0.0);
            assert_eq!(e.to_mat3(), Mat3::IDENTITY);
            assert_eq!(e.to_quat(), Quat::IDENTITY);
        }
    }

    #[test]
    fn test_identity_extracts_zero() {
        for order in EulerOrder::ALL {
            let e = Mat3::IDENTITY.to_euler(order).unwrap();
            assert_eq!((e.x, e.y, e.z), (0.0, 0.0, 0.0), "{order}");
            assert_eq!(e.order, order);
        }
    }

    #[test]
    fn test_gimbal_lock_xyz() {
        // Ry(+90°) in the middle: zy = zz = 0, zx = 1.
        let (s, c) = 0.3f32.sin_cos();
        let m = Mat3::from_rows_array([
            [0.0, 0.0, 1.0],
            [s, c, 0.0],
            [-c, s, 0.0],
        ]);
        let e = m.to_euler_assuming_orthonormal(EulerOrder::XYZ).unwrap();
        assert_abs_diff_eq!(e.x, 0.3, epsilon = 1e-6);
        assert_eq!(e.y, FRAC_PI_2);
        assert_eq!(e.z, 0.0);

        // Orthonormalizing keeps the exact zeros.
        let e = m.to_euler(EulerOrder::XYZ).unwrap();
        assert_abs_diff_eq!(e.x, 0.3, epsilon = 1e-6);
        assert_eq!(e.y, FRAC_PI_2);
        assert_eq!(e.z, 0.0);
    }

    #[test]
    fn test_gimbal_lock_xyz_negative() {
        let (s, c) = 0.8f32.sin_cos();
        // Rx(0.8) * Ry(-90°)
        let m = Mat3::from_rows_array([
            [0.0, 0.0, -1.0],
            [-s, c, 0.0],
            [c, s, 0.0],
        ]);
        let e = m.to_euler_assuming_orthonormal(EulerOrder::XYZ).unwrap();
        assert_eq!(e.y, -FRAC_PI_2);
        assert_eq!(e.z, 0.0);
        assert!((e.x - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_gimbal_lock_zyx() {
        // Rz(0.6) * Ry(+90°): xx = xy = 0, xz = -1.
        let (s, c) = 0.6f32.sin_cos();
        let m = Mat3::from_rows_array([
            [0.0, -s, c],
            [0.0, c, s],
            [-1.0, 0.0, 0.0],
        ]);
        let e = m.to_euler_assuming_orthonormal(EulerOrder::ZYX).unwrap();
        assert_eq!(e.x, 0.0);
        assert_eq!(e.y, FRAC_PI_2);
        assert!((e.z - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_gimbal_lock_every_order_rebuilds_matrix() {
        // Middle axis at exactly ±90°, built from exact 0/±1 entries.
        for order in EulerOrder::ALL {
            for sign in [1.0f32, -1.0] {
                let e = first_and_middle(order, 0.5, sign * FRAC_PI_2);
                let mut m = e.to_mat3();
                // Snap the cos(π/2) residue so the degenerate branch is taken.
                for col in [&mut m.x, &mut m.y, &mut m.z] {
                    for v in [&mut col.x, &mut col.y, &mut col.z] {
                        if v.abs() < 1e-6 {
                            *v = 0.0;
                        }
                    }
                }
                let back = m.to_euler_assuming_orthonormal(order).unwrap();
                let diff = max_diff(&back.to_mat3(), &m);
                assert!(diff < 1e-5, "{order} {sign}: {back:?}");
            }
        }
    }
}
