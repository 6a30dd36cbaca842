//! Error types for rotation conversions.
//!
//! Only two things can go wrong in this crate:
//!
//! - A rotation is requested from a matrix whose determinant is not positive
//!   (a reflection, a singular matrix, or garbage). See
//!   [`RotationError::NotOrientationPreserving`].
//! - An [`EulerOrder`](crate::EulerOrder) is parsed from a string that does
//!   not name one of the six orders.
//!
//! Singular matrices in plain arithmetic ([`Mat3::inv`](crate::Mat3::inv),
//! matrix division) are *not* errors; they propagate NaN/Inf like any other
//! floating-point division by zero. Use
//! [`Mat3::try_inverse`](crate::Mat3::try_inverse) for a checked inverse.
//!
//! # Usage
//!
//! ```rust
//! use rotkit_math::{Mat3, RotationError};
//!
//! let mirror = Mat3::diagonal(-1.0, 1.0, 1.0);
//! match mirror.to_quat() {
//!     Err(RotationError::NotOrientationPreserving { det }) => assert_eq!(det, -1.0),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// Errors raised by rotation extraction and parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RotationError {
    /// The matrix has `det() <= 0` (or a NaN determinant), so it does not
    /// describe a rotation.
    #[error("cannot extract a rotation from a matrix that is not orientation-preserving (det = {det})")]
    NotOrientationPreserving {
        /// Determinant of the offending matrix.
        det: f32,
    },

    /// Text did not name one of the six Euler orders.
    #[error("unknown Euler order: {0:?} (expected one of XYZ, YZX, ZXY, ZYX, YXZ, XZY)")]
    UnknownEulerOrder(String),
}

impl RotationError {
    /// Creates a [`RotationError::NotOrientationPreserving`] error.
    #[inline]
    pub fn not_orientation_preserving(det: f32) -> Self {
        Self::NotOrientationPreserving { det }
    }

    /// Returns `true` if this is the non-positive determinant error.
    #[inline]
    pub fn is_orientation_error(&self) -> bool {
        matches!(self, Self::NotOrientationPreserving { .. })
    }
}

/// Result type for rotation conversions.
pub type RotationResult<T> = Result<T, RotationError>;
