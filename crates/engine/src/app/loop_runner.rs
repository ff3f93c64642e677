use std::io::{self, Write};

use thiserror::Error;
use tracing::{info, warn};

use super::input::InputAction;
use super::metrics::{LoopMetricsSnapshot, MetricsAccumulator};
use super::rendering::TextRenderer;
use super::session::Session;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    /// Write every rendered frame to the output stream.
    pub echo_frames: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Hero movement".to_string(),
            echo_frames: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to write frame {frame}: {source}")]
    WriteFrame {
        frame: u64,
        #[source]
        source: io::Error,
    },
}

/// Runs one frame per item of `frames`: apply that frame's actions in order,
/// recenter the camera, render, write. A `Quit` action ends the loop once its
/// frame has been drawn. Blocked and rejected moves are counted, never fatal.
pub fn run_frames<I, W>(
    config: &LoopConfig,
    session: &mut Session,
    frames: I,
    out: &mut W,
) -> Result<LoopMetricsSnapshot, AppError>
where
    I: IntoIterator<Item = Vec<InputAction>>,
    W: Write,
{
    let session_config = *session.config();
    let mut renderer = TextRenderer::new(session_config.layout, session_config.viewport);
    let mut metrics = MetricsAccumulator::default();
    info!(
        title = %config.window_title,
        policy = session.policy().label(),
        camera_enabled = session_config.camera_enabled,
        "loop_started"
    );

    if config.echo_frames {
        write_title(out, &config.window_title).map_err(|source| AppError::WriteFrame {
            frame: 0,
            source,
        })?;
    }
    present(config, session, &mut renderer, out, metrics.snapshot().frames)?;
    metrics.record_frame();

    for actions in frames {
        let mut quit_requested = false;
        for action in actions {
            let Some(direction) = action.direction() else {
                quit_requested = true;
                continue;
            };
            match session.step(direction) {
                Ok(resolved) => metrics.record_move(resolved.outcome),
                Err(error) => {
                    warn!(error = %error, ?direction, "move_rejected");
                    metrics.record_rejected();
                }
            }
        }

        present(config, session, &mut renderer, out, metrics.snapshot().frames)?;
        metrics.record_frame();

        if quit_requested {
            info!(reason = "quit_action", "shutdown_requested");
            break;
        }
    }

    let summary = metrics.snapshot();
    info!(
        frames = summary.frames,
        moves_accepted = summary.moves_accepted,
        moves_blocked = summary.moves_blocked,
        moves_rejected = summary.moves_rejected,
        player = %session.player(),
        "loop_summary"
    );
    Ok(summary)
}

fn present<W: Write>(
    config: &LoopConfig,
    session: &mut Session,
    renderer: &mut TextRenderer,
    out: &mut W,
    frame_index: u64,
) -> Result<(), AppError> {
    let offset = session.refresh_camera();
    if !config.echo_frames {
        return Ok(());
    }
    let frame = renderer.render(&session.sprites(), offset);
    let header = format!(
        "-- frame {frame_index} player {} offset ({}, {})",
        session.player(),
        offset.dx,
        offset.dy
    );
    write_frame(out, &header, frame.lines()).map_err(|source| AppError::WriteFrame {
        frame: frame_index,
        source,
    })
}

fn write_frame<W: Write>(out: &mut W, header: &str, lines: &[String]) -> io::Result<()> {
    writeln!(out, "{header}")?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

fn write_title<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "== {title} ==")
}
