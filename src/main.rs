use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use armkit::commands::{self, Pose};
use armkit::{init_logging, verbosity_level, Camera, Config, ConnectionParams, JointAngles, Point2D};

#[derive(Parser)]
#[command(version, propagate_version = true)]
#[command(about = "Two-link inverse kinematics visualizer and servo link", long_about = None)]
struct Args {
    /// Config file (.toml or .json). Defaults to the platform config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Pose given either as angles or as a world target.
#[derive(clap::Args)]
struct PoseArgs {
    /// Base angle in degrees.
    #[arg(long, allow_hyphen_values = true, requires = "theta1", conflicts_with_all = ["x", "y"])]
    theta0: Option<f64>,

    /// Elbow angle in degrees, relative to link 1.
    #[arg(long, allow_hyphen_values = true, requires = "theta0")]
    theta1: Option<f64>,

    /// Target x in world units.
    #[arg(short, long, allow_hyphen_values = true, requires = "y")]
    x: Option<f64>,

    /// Target y in world units.
    #[arg(short, long, allow_hyphen_values = true, requires = "x")]
    y: Option<f64>,
}

impl PoseArgs {
    fn pose(&self) -> Option<Pose> {
        match (self.theta0, self.theta1, self.x, self.y) {
            (Some(theta0), Some(theta1), _, _) => {
                Some(Pose::Angles(JointAngles::new(theta0, theta1)))
            }
            (_, _, Some(x), Some(y)) => Some(Pose::Target(Point2D::new(x, y))),
            _ => None,
        }
    }
}

#[derive(clap::Subcommand)]
enum Command {
    /// Solve joint angles for a world target.
    Solve {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
    },
    /// Render the arm to an SVG file.
    Render {
        /// Output file.
        #[arg(short, long, default_value = "armkit.svg")]
        output: PathBuf,

        #[command(flatten)]
        pose: PoseArgs,

        /// Camera centre x.
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0, value_parser = commands::parse_finite)]
        cam_x: f64,

        /// Camera centre y.
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0, value_parser = commands::parse_finite)]
        cam_y: f64,

        /// Pixels per world unit.
        #[arg(long, default_value_t = 1.0, value_parser = commands::parse_zoom)]
        zoom: f64,
    },
    /// Send a pose to the servo controller.
    Send {
        /// Serial port, overrides the config file.
        #[arg(short, long)]
        port: Option<String>,

        #[command(flatten)]
        pose: PoseArgs,

        /// Keep the port open this long to log device replies.
        #[arg(long, default_value_t = 500)]
        hold_ms: u64,
    },
    /// List candidate serial ports.
    Ports,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path,
        None => match armkit_settings::default_config_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!("{}, using defaults", e);
                return Ok(Config::default());
            }
        },
    };
    Config::load_or_default(&path).with_context(|| format!("loading {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(verbosity_level(args.verbose))?;
    tracing::debug!("armkit {} built {}", armkit::VERSION, armkit::BUILD_DATE);

    let config = load_config(args.config)?;

    match args.command {
        Command::Solve { x, y } => {
            let links = config.arm.links()?;
            println!("{}", commands::solve_report(&links, Point2D::new(x, y))?);
        }
        Command::Render {
            output,
            pose,
            cam_x,
            cam_y,
            zoom,
        } => {
            let camera = Camera::new(cam_x, cam_y, zoom);
            commands::render_to_file(&config, pose.pose(), Some(camera), &output)?;
        }
        Command::Send {
            port,
            pose,
            hold_ms,
        } => {
            let links = config.arm.links()?;
            let angles = match pose.pose() {
                Some(pose) => pose.resolve(&links)?,
                None => JointAngles::default(),
            };

            let mut settings = config.connection.clone();
            if port.is_some() {
                settings.port = port;
            }
            let params: ConnectionParams = settings
                .params()
                .context("no serial port given; pass --port or set connection.port")?;

            let stats = commands::send_pose(&params, angles, Duration::from_millis(hold_ms))?;
            println!("Sent {} to {} ({} frame(s))", angles, params.port, stats.sent);
        }
        Command::Ports => println!("{}", commands::ports_report()?),
    }

    Ok(())
}
