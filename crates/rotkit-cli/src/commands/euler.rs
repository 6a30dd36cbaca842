//! Euler command - angles to matrix and quaternion

use anyhow::Result;
use rotkit_math::EulerAngles;
use tracing::debug;

use crate::EulerArgs;
use crate::commands::{EulerReport, Report};

pub fn run(args: EulerArgs, json: bool) -> Result<()> {
    let angles = if args.degrees {
        EulerAngles::from_degrees(args.order, args.x, args.y, args.z)
    } else {
        EulerAngles::new(args.order, args.x, args.y, args.z)
    };
    debug!(?angles, "euler input");

    let m = angles.to_mat3();
    let report = Report {
        det: Some(m.det()),
        quat: Some(angles.to_quat()),
        euler: vec![EulerReport::new(angles, args.degrees)],
        ..Report::default()
    }
    .with_matrix(&m);

    report.print(json)
}
