//! Quat command - quaternion to matrix and Euler angles

use anyhow::{Context, Result, bail};
use rotkit_math::Quat;
use tracing::debug;

use crate::QuatArgs;
use crate::commands::{EulerReport, Report};

pub fn run(args: QuatArgs, json: bool) -> Result<()> {
    let raw = Quat::new(args.w, args.x, args.y, args.z);
    if !raw.is_finite() || [raw.w, raw.x, raw.y, raw.z].iter().all(|&c| c == 0.0) {
        bail!("quaternion {raw:?} does not describe a rotation");
    }

    let q = raw.normalize();
    debug!(?raw, ?q, "normalized input quaternion");

    let m = q.to_mat3();
    let angles = m
        .to_euler(args.order)
        .with_context(|| format!("Failed to extract {} angles", args.order))?;

    let report = Report {
        det: Some(m.det()),
        quat: Some(q),
        euler: vec![EulerReport::new(angles, args.degrees)],
        ..Report::default()
    }
    .with_matrix(&m);

    report.print(json)
}
