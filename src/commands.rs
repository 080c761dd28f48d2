//! Implementations behind the command-line subcommands.

use anyhow::Context;
use armkit_communication::{
    list_ports, AngleSink, ChannelStats, ConnectionParams, DeviceChannel, SerialPortInfo,
};
use armkit_core::{JointAngles, LinkLengths, Point2D};
use armkit_kinematics::{forward, Solver, TwoLinkSolver};
use armkit_settings::Config;
use armkit_ui::{ClickOutcome, Session};
use armkit_visualizer::{Camera, SvgRenderer};
use std::path::Path;
use std::time::{Duration, Instant};

/// Pose to draw or send: explicit angles or a world target to solve for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pose {
    Angles(JointAngles),
    Target(Point2D),
}

impl Pose {
    /// Resolves to joint angles, solving for targets.
    pub fn resolve(&self, links: &LinkLengths) -> anyhow::Result<JointAngles> {
        match *self {
            Pose::Angles(angles) => Ok(angles),
            Pose::Target(target) => TwoLinkSolver
                .solve(target, links)
                .with_context(|| format!("cannot reach {}", target)),
        }
    }
}

/// Command-line parser for coordinates: any finite number.
pub fn parse_finite(text: &str) -> Result<f64, String> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|e| format!("`{}` is not a number: {}", text, e))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("`{}` is not finite", text))
    }
}

/// Command-line parser for zoom: finite and greater than zero.
pub fn parse_zoom(text: &str) -> Result<f64, String> {
    let zoom = parse_finite(text)?;
    if zoom > 0.0 {
        Ok(zoom)
    } else {
        Err(format!("zoom must be greater than zero, got {}", zoom))
    }
}

/// Solves `target` and formats the result with the forward check.
pub fn solve_report(links: &LinkLengths, target: Point2D) -> anyhow::Result<String> {
    let angles = Pose::Target(target).resolve(links)?;
    let pose = forward(&angles, links);
    Ok(format!(
        "theta0 = {:.4}°\ntheta1 = {:.4}°\njoint  = {}\nend    = {}",
        angles.theta0, angles.theta1, pose.joint, pose.end
    ))
}

/// Renders the arm as an SVG document.
///
/// With a target pose the solve goes through a simulated click at the
/// target's screen position, exactly as an interactive session would.
pub fn render_svg(
    config: &Config,
    pose: Option<Pose>,
    camera: Option<Camera>,
) -> anyhow::Result<String> {
    let mut session = Session::from_config(config)?;
    if let Some(camera) = camera {
        session.set_camera(camera);
    }

    match pose {
        Some(Pose::Angles(angles)) => {
            anyhow::ensure!(session.set_angles(angles), "angles must be finite");
        }
        Some(Pose::Target(target)) => {
            let screen = session.viewport().world_to_screen(target);
            session.pointer_down(screen);
            session.pointer_up();
            match session.click(screen) {
                ClickOutcome::Solved(_) => {}
                ClickOutcome::Unreachable(e) => {
                    return Err(e).with_context(|| format!("cannot reach {}", target));
                }
                ClickOutcome::Rejected(angles) => {
                    anyhow::bail!("solving {} gave unusable angles {}", target, angles);
                }
                ClickOutcome::Suppressed => anyhow::bail!("click on {} was suppressed", target),
            }
        }
        None => {}
    }

    let mut renderer = SvgRenderer::new(config.window.width, config.window.height);
    session.render(&mut renderer);
    Ok(renderer.into_document())
}

/// Renders to `path`.
pub fn render_to_file(
    config: &Config,
    pose: Option<Pose>,
    camera: Option<Camera>,
    path: &Path,
) -> anyhow::Result<()> {
    let svg = render_svg(config, pose, camera)?;
    std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Opens the port, sends one pose and waits for it to be written.
///
/// The port stays open for `hold` afterwards so device replies get logged.
pub fn send_pose(
    params: &ConnectionParams,
    angles: JointAngles,
    hold: Duration,
) -> anyhow::Result<ChannelStats> {
    let mut channel = DeviceChannel::new();
    channel
        .connect(params)
        .with_context(|| format!("opening {}", params.port))?;

    channel.send_angles(angles.theta0, angles.theta1);

    let deadline = Instant::now() + Duration::from_secs(2);
    while channel.stats().sent == 0 && channel.is_connected() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    anyhow::ensure!(channel.stats().sent > 0, "frame was not written to {}", params.port);

    std::thread::sleep(hold);
    let stats = channel.stats();
    channel.disconnect();
    Ok(stats)
}

/// One line per port: name, description and USB ids when known.
pub fn format_ports(ports: &[SerialPortInfo]) -> String {
    if ports.is_empty() {
        return "No serial ports found".to_string();
    }

    ports
        .iter()
        .map(|port| match (port.vid, port.pid) {
            (Some(vid), Some(pid)) => format!(
                "{}\t{} [{:04x}:{:04x}]",
                port.port_name, port.description, vid, pid
            ),
            _ => format!("{}\t{}", port.port_name, port.description),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn ports_report() -> anyhow::Result<String> {
    Ok(format_ports(&list_ports()?))
}
