//! JSON command protocol for scripting a fitting session.
//!
//! Commands run against a [`TestHarness`]; every command answers with a
//! [`CommandResponse`] so a batch never aborts half way.

use serde::{Deserialize, Serialize};
use shared::SnapMode;

use crate::build::primitives::DEFAULT_TESSELLATION;
use crate::harness::TestHarness;

fn default_tessellation() -> u32 {
    DEFAULT_TESSELLATION
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum FitCommand {
    AddBox {
        width: f64,
        height: f64,
        depth: f64,
    },
    AddCylinder {
        height: f64,
        diameter_top: f64,
        diameter_bottom: f64,
        #[serde(default = "default_tessellation")]
        tessellation: u32,
        #[serde(default)]
        is_horizontal: bool,
    },
    AddSphere {
        diameter_x: f64,
        diameter_y: f64,
        diameter_z: f64,
        #[serde(default = "default_tessellation")]
        tessellation: u32,
    },
    AddText {
        text: String,
        size: f64,
        depth: f64,
    },
    /// Set the stock size and rebuild the body
    DrawBody {
        width: f64,
        height: f64,
        depth: f64,
    },
    SetSnapMode {
        mode: SnapMode,
    },
    /// Press on a shape's pivot, move by (dx, dz) and release
    Drag {
        id: String,
        dx: f64,
        dz: f64,
    },
    /// List shapes and body state
    Inspect,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn shape_added<E: std::fmt::Display>(result: Result<String, E>) -> CommandResponse {
    match result {
        Ok(id) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

pub fn execute_command(harness: &mut TestHarness, cmd: FitCommand) -> CommandResponse {
    match cmd {
        FitCommand::AddBox { width, height, depth } => shape_added(harness.add_box(width, height, depth)),

        FitCommand::AddCylinder {
            height,
            diameter_top,
            diameter_bottom,
            tessellation,
            is_horizontal,
        } => shape_added(harness.add_cylinder(height, diameter_top, diameter_bottom, tessellation, is_horizontal)),

        FitCommand::AddSphere {
            diameter_x,
            diameter_y,
            diameter_z,
            tessellation,
        } => shape_added(harness.add_sphere(diameter_x, diameter_y, diameter_z, tessellation)),

        FitCommand::AddText { text, size, depth } => shape_added(harness.add_text(&text, size, depth)),

        FitCommand::DrawBody { width, height, depth } => match harness.draw_body(width, height, depth) {
            Ok(body) => CommandResponse::ok_with_data(serde_json::json!({
                "volume": body.volume,
                "triangles": body.mesh.triangle_count(),
                "generation": body.generation,
            })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        FitCommand::SetSnapMode { mode } => {
            harness.set_snap_mode(mode);
            CommandResponse::ok()
        }

        FitCommand::Drag { id, dx, dz } => match harness.drag_by(&id, dx, dz) {
            Ok(p) => CommandResponse::ok_with_data(serde_json::json!({ "position": [p.x, p.y, p.z] })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        FitCommand::Inspect => {
            let builder = &harness.builder;
            let shapes: Vec<serde_json::Value> = builder
                .shapes()
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "id": s.id,
                        "params": s.params,
                        "position": [s.position.x, s.position.y, s.position.z],
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "shape_count": shapes.len(),
                "shapes": shapes,
                "snap_mode": builder.snap_mode(),
                "body_volume": builder.body().map(|b| b.volume),
                "last_error": builder.last_error().map(|e| e.to_string()),
            }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: FitCommand = serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute a JSON array of commands.
pub fn execute_json_batch(harness: &mut TestHarness, json: &str) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<FitCommand> = serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
