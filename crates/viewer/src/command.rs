//! JSON command protocol for scripted and remote control.
//!
//! One command per JSON object, tagged by `"command"`. Every command gets a
//! response; unknown part ids and invalid transitions are reported as
//! `success: true` with `"accepted": false` since they never change state.

use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::CycleDirection;

use crate::harness::ViewerHarness;
use crate::navigation::NavigationCommands;

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_frames() -> u32 {
    1
}

fn default_max_frames() -> u32 {
    2_000
}

/// A command understood by the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewerCommand {
    /// Nudge the active explosion factor
    AdjustExplosion { delta: f32 },
    /// Set the active explosion factor
    SetExplosion { value: f32 },
    /// Focus, drill or pick a sub-part
    Select { id: String },
    /// Move the navigation pointer
    Cycle { direction: CycleDirection },
    /// Pop one navigation level
    GoBack,
    /// Set or clear the hovered part
    Hover {
        #[serde(default)]
        id: Option<String>,
    },
    /// Select the hovered part, or the pointer if nothing is hovered
    Activate,
    /// Advance frames of `dt` seconds
    Tick {
        #[serde(default = "default_frames")]
        frames: u32,
        #[serde(default = "default_dt")]
        dt: f32,
    },
    /// Tick until all motion stops
    Settle {
        #[serde(default = "default_max_frames")]
        max_frames: u32,
    },
    /// Collapse to the assembled view
    Reset,
    /// Report mode, factors and poses
    Inspect,
}

/// Response from executing a command.
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

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut ViewerHarness, cmd: ViewerCommand) -> CommandResponse {
    tracing::trace!("Executing {:?}", cmd);
    let machine = &mut harness.machine;
    match cmd {
        ViewerCommand::AdjustExplosion { delta } => {
            let target = machine.adjust_explosion(delta);
            CommandResponse::ok_with_data(json!({
                "target": target,
                "mode": machine.mode(),
            }))
        }

        ViewerCommand::SetExplosion { value } => {
            let target = machine.set_explosion(value);
            CommandResponse::ok_with_data(json!({
                "target": target,
                "mode": machine.mode(),
            }))
        }

        ViewerCommand::Select { id } => {
            let accepted = machine.select_part(&id);
            CommandResponse::ok_with_data(json!({
                "accepted": accepted,
                "mode": machine.mode(),
                "focused": machine.focused_part(),
                "drilled": machine.is_drilled(),
            }))
        }

        ViewerCommand::Cycle { direction } => {
            let part = machine.cycle(direction);
            CommandResponse::ok_with_data(json!({
                "part": part,
                "index": machine.state().navigation_index(),
            }))
        }

        ViewerCommand::GoBack => {
            let changed = machine.go_back();
            CommandResponse::ok_with_data(json!({
                "changed": changed,
                "mode": machine.mode(),
            }))
        }

        ViewerCommand::Hover { id } => {
            let accepted = machine.set_hovered_part(id.as_deref());
            CommandResponse::ok_with_data(json!({
                "accepted": accepted,
                "hovered": machine.hovered_part(),
            }))
        }

        ViewerCommand::Activate => {
            let accepted = machine.activate_hovered() || machine.activate_highlighted();
            CommandResponse::ok_with_data(json!({
                "accepted": accepted,
                "focused": machine.focused_part(),
            }))
        }

        ViewerCommand::Tick { frames, dt } => {
            if !dt.is_finite() || dt < 0.0 {
                return CommandResponse::err(format!("invalid frame time {dt}"));
            }
            for _ in 0..frames {
                harness.update(dt);
            }
            CommandResponse::ok_with_data(json!({
                "ticks": harness.ticks(),
                "settled": harness.machine.is_settled(),
            }))
        }

        ViewerCommand::Settle { max_frames } => match harness.settle(max_frames) {
            Some(frames) => CommandResponse::ok_with_data(json!({ "frames": frames })),
            None => CommandResponse::err(format!("still moving after {max_frames} frames")),
        },

        ViewerCommand::Reset => {
            machine.reset_view();
            CommandResponse::ok()
        }

        ViewerCommand::Inspect => CommandResponse::ok_with_data(inspect(harness)),
    }
}

fn inspect(harness: &ViewerHarness) -> serde_json::Value {
    let machine = &harness.machine;
    let state = machine.state();
    let mut poses: Vec<_> = machine.poses().iter().collect();
    poses.sort_by(|a, b| a.0.cmp(b.0));
    let poses: serde_json::Map<String, serde_json::Value> = poses
        .into_iter()
        .map(|(id, pose)| (id.clone(), json!(pose)))
        .collect();

    json!({
        "model": machine.registry().model_name(),
        "mode": machine.mode(),
        "focused": machine.focused_part(),
        "drilled": machine.is_drilled(),
        "hovered": machine.hovered_part(),
        "highlighted": machine.highlighted_part(),
        "global": { "current": state.global().current(), "target": state.global().target() },
        "part": { "current": state.part().current(), "target": state.part().target() },
        "settled": machine.is_settled(),
        "interactable": machine.interactable_parts(),
        "poses": poses,
    })
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut ViewerHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: ViewerCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut ViewerHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<ViewerCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
