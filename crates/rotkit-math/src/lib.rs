//! # rotkit-math
//!
//! Rotation math: a 3x3 matrix type and conversions between the three
//! common rotation representations.
//!
//! - [`Mat3`] - 3x3 matrices: arithmetic, determinant, inverse,
//!   orthonormalization, extraction of quaternions and Euler angles
//! - [`Quat`] - quaternions `(w, x, y, z)`
//! - [`EulerAngles`], [`EulerOrder`] - three angles in one of six axis orders
//! - [`Vec3`] - 3D vectors
//!
//! # Design
//!
//! Every type is a small `Copy` value; every operation returns a new value.
//! Matrices are stored as **columns** and act on **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Extraction (`Mat3 -> Quat`, `Mat3 -> EulerAngles`) first snaps the
//! matrix to the nearest rotation with [`Mat3::orthonormalize`], and fails
//! with [`RotationError::NotOrientationPreserving`] when `det() <= 0`.
//! Construction (`EulerAngles -> Quat`, `EulerAngles -> Mat3`) is closed form
//! and cannot fail.
//!
//! # Usage
//!
//! ```rust
//! use rotkit_math::{EulerAngles, EulerOrder, Mat3};
//!
//! let e = EulerAngles::new(EulerOrder::XYZ, 0.1, 0.2, 0.3);
//! let m = e.to_mat3();
//!
//! let q = m.to_quat()?;
//! let back = m.to_euler(EulerOrder::XYZ)?;
//! assert!((back.z - 0.3).abs() < 1e-5);
//! assert!(q.dot(e.to_quat()).abs() > 0.9999);
//! # Ok::<(), rotkit_math::RotationError>(())
//! ```
//!
//! # Features
//!
//! - `serde` - `Serialize`/`Deserialize` for all value types
//!
//! # Dependencies
//!
//! - [`glam`] - interop conversions (`From`/`Into` both ways)
//! - [`thiserror`] - error type
//! - [`tracing`] - diagnostics from the iterative orthonormalization

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod euler;
mod mat3;
mod quat;
mod vec3;

pub use error::*;
pub use euler::*;
pub use mat3::*;
pub use quat::*;
pub use vec3::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{Mat3 as GlamMat3, Quat as GlamQuat, Vec3 as GlamVec3};
}
