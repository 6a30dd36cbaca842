//! CLI command implementations

pub mod euler;
pub mod matrix;
pub mod quat;

use anyhow::{Context, Result};
use rotkit_math::{EulerAngles, EulerOrder, Mat3, Quat};
use serde::Serialize;

/// Euler angles as printed, in the unit the user asked for.
#[derive(Serialize)]
pub struct EulerReport {
    pub order: EulerOrder,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub degrees: bool,
}

impl EulerReport {
    pub fn new(angles: EulerAngles, degrees: bool) -> Self {
        let [x, y, z] = if degrees {
            angles.to_degrees()
        } else {
            [angles.x, angles.y, angles.z]
        };
        Self {
            order: angles.order,
            x,
            y,
            z,
            degrees,
        }
    }
}

/// Everything a command prints.
#[derive(Serialize, Default)]
pub struct Report {
    /// Rows of the rotation matrix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<[[f32; 3]; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub det: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quat: Option<Quat>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub euler: Vec<EulerReport>,
}

impl Report {
    pub fn with_matrix(mut self, m: &Mat3) -> Self {
        self.matrix = Some(m.to_rows_array());
        self
    }

    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            let out = serde_json::to_string_pretty(self).context("Failed to encode JSON")?;
            println!("{out}");
            return Ok(());
        }

        if let Some(rows) = &self.matrix {
            println!("matrix:");
            for row in rows {
                println!("  [{:>10.6} {:>10.6} {:>10.6}]", row[0], row[1], row[2]);
            }
        }
        if let Some(det) = self.det {
            println!("det:    {det:.7}");
        }
        if let Some(q) = &self.quat {
            println!("quat:   w={:.6} x={:.6} y={:.6} z={:.6}", q.w, q.x, q.y, q.z);
        }
        for e in &self.euler {
            let unit = if e.degrees { "deg" } else { "rad" };
            println!("euler {}: x={:.6} y={:.6} z={:.6} ({unit})", e.order, e.x, e.y, e.z);
        }
        Ok(())
    }
}
