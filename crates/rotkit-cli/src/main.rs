//! rotkit - rotation conversion CLI
//!
//! Converts between Euler angles, quaternions and 3x3 rotation matrices.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use rotkit_math::EulerOrder;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rotkit")]
#[command(author, version, about = "Rotation matrix / quaternion / Euler angle conversions")]
#[command(long_about = "
Converts a rotation between its three common representations.

Euler orders: XYZ, YZX, ZXY, ZYX, YXZ, XZY (case-insensitive).
Order XYZ means M = Rx * Ry * Rz.

Examples:
  rotkit euler xyz 0.1 0.2 0.3              # Matrix and quaternion
  rotkit euler zyx 90 0 45 --degrees
  rotkit quat 0.7071 0 0 0.7071 --order zyx
  rotkit matrix 0 -1 0  1 0 0  0 0 1        # Row-major, 9 values
  rotkit matrix 1 0.1 0 0 1 0 0 0 1 --all   # Orthonormalize, all six orders
  rotkit --json euler yxz 1 2 3
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Machine-readable output (JSON)
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Euler angles to a matrix and a quaternion
    #[command(visible_alias = "e")]
    Euler(EulerArgs),

    /// Convert a quaternion (w x y z) to a matrix and Euler angles
    #[command(visible_alias = "q")]
    Quat(QuatArgs),

    /// Orthonormalize a matrix and extract quaternion and Euler angles
    #[command(visible_alias = "m")]
    Matrix(MatrixArgs),
}

/// Arguments for the `euler` command.
#[derive(Args)]
struct EulerArgs {
    /// Axis order
    order: EulerOrder,

    /// Rotation about X
    #[arg(allow_negative_numbers = true)]
    x: f32,

    /// Rotation about Y
    #[arg(allow_negative_numbers = true)]
    y: f32,

    /// Rotation about Z
    #[arg(allow_negative_numbers = true)]
    z: f32,

    /// Angles are in degrees
    #[arg(short, long)]
    degrees: bool,
}

/// Arguments for the `quat` command.
#[derive(Args)]
struct QuatArgs {
    /// Scalar part
    #[arg(allow_negative_numbers = true)]
    w: f32,

    /// i component
    #[arg(allow_negative_numbers = true)]
    x: f32,

    /// j component
    #[arg(allow_negative_numbers = true)]
    y: f32,

    /// k component
    #[arg(allow_negative_numbers = true)]
    z: f32,

    /// Euler order for the angle output
    #[arg(short, long, default_value = "XYZ")]
    order: EulerOrder,

    /// Print angles in degrees
    #[arg(short, long)]
    degrees: bool,
}

/// Arguments for the `matrix` command.
#[derive(Args)]
struct MatrixArgs {
    /// Nine components, row by row
    #[arg(num_args = 9, required = true, allow_negative_numbers = true)]
    values: Vec<f32>,

    /// Euler order for the angle output
    #[arg(short, long, default_value = "XYZ", conflicts_with = "all")]
    order: EulerOrder,

    /// Print Euler angles for all six orders
    #[arg(short, long)]
    all: bool,

    /// Print angles in degrees
    #[arg(short, long)]
    degrees: bool,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Euler(args) => commands::euler::run(args, cli.json),
        Commands::Quat(args) => commands::quat::run(args, cli.json),
        Commands::Matrix(args) => commands::matrix::run(args, cli.json),
    }
}
