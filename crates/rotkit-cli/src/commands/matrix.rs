//! Matrix command - orthonormalize, then extract quaternion and Euler angles

use anyhow::{Context, Result};
use rotkit_math::{EulerOrder, Mat3, Quat};
use tracing::{debug, info};

use crate::MatrixArgs;
use crate::commands::{EulerReport, Report};

pub fn run(args: MatrixArgs, json: bool) -> Result<()> {
    let input = parse_rows(&args.values)?;
    let det = input.det();
    debug!(det, "input matrix");

    let (r, q) = nearest_rotation(&input)?;
    let distance = (r - input).norm();
    if distance > 1e-4 {
        info!(distance, "input was not orthonormal; using nearest rotation");
    }

    let orders: Vec<EulerOrder> = if args.all {
        EulerOrder::ALL.to_vec()
    } else {
        vec![args.order]
    };

    let mut euler = Vec::with_capacity(orders.len());
    for order in orders {
        let angles = r
            .to_euler_assuming_orthonormal(order)
            .with_context(|| format!("Failed to extract {order} angles"))?;
        euler.push(EulerReport::new(angles, args.degrees));
    }

    let report = Report {
        det: Some(det),
        quat: Some(q),
        euler,
        ..Report::default()
    }
    .with_matrix(&r);

    report.print(json)
}

/// Orthonormalizes once and extracts the quaternion from the result.
fn nearest_rotation(input: &Mat3) -> Result<(Mat3, Quat)> {
    let r = input.orthonormalize();
    let q = r.to_quat_assuming_orthonormal().context("Input matrix is not a rotation")?;
    Ok((r, q))
}

/// Builds a matrix from nine row-major values.
fn parse_rows(values: &[f32]) -> Result<Mat3> {
    let rows: [f32; 9] = values
        .try_into()
        .with_context(|| format!("Expected 9 matrix values, got {}", values.len()))?;
    Ok(Mat3::from_rows_array([
        [rows[0], rows[1], rows[2]],
        [rows[3], rows[4], rows[5]],
        [rows[6], rows[7], rows[8]],
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let m = parse_rows(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
        assert_eq!(m.row(1).to_array(), [4.0, 5.0, 6.0]);
        assert_eq!(m.col(0).to_array(), [1.0, 4.0, 7.0]);
    }

    #[test]
    fn test_nearest_rotation_matches_checked_extraction() {
        let skewed = parse_rows(&[1.0, 0.2, 0.0, 0.0, 2.0, 0.1, 0.0, 0.0, 0.5]).unwrap();
        let (r, q) = nearest_rotation(&skewed).unwrap();
        assert_eq!(r, skewed.orthonormalize());
        assert_eq!(q, skewed.to_quat().unwrap());
    }

    #[test]
    fn test_nearest_rotation_rejects_reflection() {
        let mirror = Mat3::diagonal(1.0, 1.0, -1.0);
        assert!(nearest_rotation(&mirror).is_err());
        assert!(nearest_rotation(&Mat3::ZERO).is_err());
    }

    #[test]
    fn test_parse_rows_wrong_count() {
        assert!(parse_rows(&[1.0, 2.0]).is_err());
    }
}
