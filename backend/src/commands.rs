//! Text protocol spoken over the WebSocket.
//!
//! Clients send `COMMAND:{json}` frames, where the JSON object carries an
//! `op` tag, or a bare `SNAPSHOT`. Every command is answered with a
//! `RESULT:` frame followed by a `SCENE_UPDATE:` frame, or with a single
//! `ERROR_UPDATE:` frame when it is rejected.

use monge_core::geometry::{ground_crossing, window_endpoints, Vector2};
use monge_core::{Label, MongeError, Session, View};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

pub const COMMAND_PREFIX: &str = "COMMAND:";
pub const SNAPSHOT: &str = "SNAPSHOT";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    DrawPoint {
        label: Label,
        coords: [f64; 2],
        view: View,
    },
    /// A line seen end-on: its projection in `view` is a point.
    DrawLinePoint {
        label: Label,
        coords: [f64; 2],
        view: View,
    },
    DrawLine {
        label: Label,
        p1: [f64; 2],
        p2: [f64; 2],
        view: View,
    },
    DrawPlaneTrace {
        label: Label,
        p1: [f64; 2],
        p2: [f64; 2],
        view: View,
        #[serde(default)]
        single_trace: bool,
    },
    BuildPoint {
        label: Label,
    },
    BuildLine {
        label: Label,
    },
    BuildPlane {
        label: Label,
        #[serde(default)]
        single_trace: bool,
    },
    MapProjections {
        label: Label,
    },
    /// Preview of a segment being drawn, extended to the drawing window.
    PreviewLine {
        p1: [f64; 2],
        p2: [f64; 2],
    },
    RemoveProjection {
        label: Label,
    },
    RemovePoint {
        label: Label,
    },
    RemoveLine {
        label: Label,
    },
    RemovePlane {
        label: Label,
    },
}

impl Command {
    /// Whether the command can change the scene.
    pub fn mutates(&self) -> bool {
        !matches!(self, Command::MapProjections { .. } | Command::PreviewLine { .. })
    }
}

/// Format an error as a JSON message for the frontend
pub fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!(
        "ERROR_UPDATE:{}",
        json!({
            "code": code,
            "message": message,
            "severity": severity
        })
    )
}

pub fn scene_update(session: &Session) -> String {
    let json = serde_json::to_string(&session.snapshot()).unwrap_or_else(|_| "{}".to_string());
    format!("SCENE_UPDATE:{}", json)
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn point(coords: [f64; 2]) -> Vector2 {
    Vector2::new(coords[0], coords[1])
}

/// Run one command against the session, returning the JSON of its outcome.
pub fn execute(session: &mut Session, command: Command) -> Result<String, MongeError> {
    let json = match command {
        Command::DrawPoint { label, coords, view } => to_json(&session.draw_point(&label, point(coords), view)?),
        Command::DrawLinePoint { label, coords, view } => {
            to_json(&session.draw_line_point(&label, point(coords), view)?)
        }
        Command::DrawLine { label, p1, p2, view } => {
            to_json(&session.draw_line(&label, point(p1), point(p2), view)?)
        }
        Command::DrawPlaneTrace {
            label,
            p1,
            p2,
            view,
            single_trace,
        } => to_json(&session.draw_plane_trace(&label, point(p1), point(p2), view, single_trace)?),
        Command::BuildPoint { label } => to_json(&session.build_point(&label)),
        Command::BuildLine { label } => to_json(&session.build_line(&label)?),
        Command::BuildPlane { label, single_trace } => to_json(&session.build_plane(&label, single_trace)?),
        Command::MapProjections { label } => to_json(&session.map_projections(&label).map(|p| [p.x, p.y, p.z])),
        Command::PreviewLine { p1, p2 } => {
            let (p1, p2) = (point(p1), point(p2));
            let limit_x = session.config().ground_line_half_length;
            let limit_y = session.config().half_extents[1];
            let [start, end] = window_endpoints(&p1, &p2, limit_x, limit_y);
            let crossing = ground_crossing(&p1, &(p2 - p1), limit_x);
            to_json(&json!({
                "endpoints": [[start.x, start.y], [end.x, end.y]],
                "ground_crossing": crossing.map(|c| [c.x, c.y]),
            }))
        }
        Command::RemoveProjection { label } => to_json(&session.remove_projection(&label)),
        Command::RemovePoint { label } => to_json(&session.remove_point(&label)),
        Command::RemoveLine { label } => to_json(&session.remove_line(&label)),
        Command::RemovePlane { label } => to_json(&session.remove_plane(&label)),
    };
    Ok(json)
}

/// Handle one text frame, returning the frames to send back.
pub fn handle_text(session: &mut Session, text: &str) -> Vec<String> {
    if text == SNAPSHOT {
        return vec![scene_update(session)];
    }
    let Some(payload) = text.strip_prefix(COMMAND_PREFIX) else {
        warn!("Unknown message: {}", text);
        return vec![format_error("UNKNOWN_MESSAGE", &format!("Unknown message: {}", text), "warning")];
    };
    let command = match serde_json::from_str::<Command>(payload) {
        Ok(command) => command,
        Err(e) => {
            warn!("Failed to parse command: {}", e);
            return vec![format_error("BAD_COMMAND", &format!("Failed to parse command: {}", e), "error")];
        }
    };

    debug!("Executing {:?}", command);
    let mutates = command.mutates();
    match execute(session, command) {
        Ok(result) => {
            let mut frames = vec![format!("RESULT:{}", result)];
            if mutates {
                frames.push(scene_update(session));
            }
            frames
        }
        Err(e) => {
            debug!("Command rejected: {}", e);
            vec![format_error(e.code(), &e.to_string(), "error")]
        }
    }
}
