//! Tool catalogue: argument decoding, dispatch onto the session and the
//! editor bridge, and the input schemas advertised by `tools/list`.

use super::{ServerState, ToolResponse};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use solidforge_core::{ModelingError, Result};
use tracing::debug;

fn default_dimension() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_format() -> String {
    "stl".to_string()
}

#[derive(Debug, Deserialize)]
struct WorkspaceArgs {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreateBoxArgs {
    #[serde(default = "default_dimension")]
    width: f64,
    #[serde(default = "default_dimension")]
    length: f64,
    #[serde(default = "default_dimension")]
    height: f64,
    #[serde(default = "default_true")]
    centered: bool,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateCylinderArgs {
    #[serde(default = "default_dimension")]
    radius: f64,
    #[serde(default = "default_dimension")]
    height: f64,
    #[serde(default = "default_true")]
    centered: bool,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BooleanArgs {
    operation: String,
    target: String,
    tool: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportArgs {
    name: String,
    #[serde(default = "default_format")]
    format: String,
    #[serde(default = "default_true")]
    validate: bool,
}

#[derive(Debug, Deserialize)]
struct ExportStepArgs {
    name: String,
    #[serde(default)]
    filepath: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScriptArgs {
    script: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectNameArgs {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct OptionalNameArgs {
    #[serde(default)]
    name: Option<String>,
}

fn decode<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ModelingError::invalid_arguments(tool, e))
}

fn respond(outcome: Result<ToolResponse>) -> ToolResponse {
    outcome.unwrap_or_else(|e| ToolResponse::failure(&e))
}

/// Run one tool against the shared state.
///
/// Every failure, including bad arguments and unknown tool names, comes back
/// as an error-status response.
pub fn call_tool(state: &mut ServerState, name: &str, arguments: Value) -> ToolResponse {
    debug!("Tool call: {}", name);
    respond(dispatch(state, name, arguments))
}

fn dispatch(state: &mut ServerState, name: &str, arguments: Value) -> Result<ToolResponse> {
    let session = &mut state.session;
    let bridge = &mut state.bridge;

    let response = match name {
        "create_workspace" => {
            let args: WorkspaceArgs = decode(name, arguments)?;
            respond(session.create_workspace(&args.name).map(|name| {
                ToolResponse::success(
                    format!("Created workspace: {}", name),
                    &json!({ "workspace_id": name }),
                )
            }))
        }
        "switch_workspace" => {
            let args: WorkspaceArgs = decode(name, arguments)?;
            respond(session.switch_workspace(&args.name).map(|name| {
                ToolResponse::success(
                    format!("Switched to workspace: {}", name),
                    &json!({ "workspace_id": name }),
                )
            }))
        }
        "list_workspaces" => {
            let list = session.list_workspaces();
            ToolResponse::success(format!("{} workspace(s)", list.workspaces.len()), &list)
        }
        "get_workspace_info" => {
            let report = session.workspace_report();
            ToolResponse::success(format!("Workspace: {}", report.info.workspace_id), &report)
        }
        "create_box" => {
            let args: CreateBoxArgs = decode(name, arguments)?;
            respond(
                session
                    .create_box(
                        args.width,
                        args.length,
                        args.height,
                        args.centered,
                        args.name.as_deref(),
                    )
                    .map(|report| {
                        ToolResponse::success(format!("Created box: {}", report.object_id), &report)
                    }),
            )
        }
        "create_cylinder" => {
            let args: CreateCylinderArgs = decode(name, arguments)?;
            respond(
                session
                    .create_cylinder(args.radius, args.height, args.centered, args.name.as_deref())
                    .map(|report| {
                        ToolResponse::success(
                            format!("Created cylinder: {}", report.object_id),
                            &report,
                        )
                    }),
            )
        }
        "boolean_operation" => {
            let args: BooleanArgs = decode(name, arguments)?;
            respond(
                session
                    .boolean_operation(&args.operation, &args.target, &args.tool, args.name.as_deref())
                    .map(|report| {
                        ToolResponse::success(
                            format!(
                                "Created {} between {} and {}",
                                args.operation.to_lowercase(),
                                args.target,
                                args.tool
                            ),
                            &report,
                        )
                    }),
            )
        }
        "export_object" => {
            let args: ExportArgs = decode(name, arguments)?;
            respond(
                session
                    .export_object(&args.name, &args.format, args.validate)
                    .map(|report| {
                        ToolResponse::success(
                            format!(
                                "Exported {} to {} format",
                                args.name,
                                args.format.trim().to_lowercase()
                            ),
                            &report,
                        )
                    }),
            )
        }
        "export_step" => {
            let args: ExportStepArgs = decode(name, arguments)?;
            respond(
                session
                    .export_step_with_path(&args.name, args.filepath.as_deref())
                    .map(|report| {
                        ToolResponse::success(
                            format!("Exported {} as STEP file", args.name),
                            &report,
                        )
                    }),
            )
        }
        "execute_script" => {
            let args: ScriptArgs = decode(name, arguments)?;
            respond(
                session
                    .execute_script(&args.script, args.name.as_deref())
                    .map(|report| {
                        ToolResponse::success(
                            format!("Created object from script: {}", report.object_id),
                            &report,
                        )
                    }),
            )
        }
        "render_object" => respond(session.render_current().map(|report| {
            ToolResponse::success(format!("Rendered {}", report.object_id), &report)
        })),
        "launch_editor" => match bridge.start() {
            Ok(()) => {
                let diagnostics = bridge.diagnose();
                ToolResponse::success(
                    "Editor launched successfully",
                    &json!({
                        "pid": diagnostics.pid,
                        "command": diagnostics.running_command,
                        "script_file": diagnostics.script_file,
                    }),
                )
            }
            Err(e) => {
                let mut response = ToolResponse::failure(&e);
                response.message = format!("Failed to launch editor: {}", e);
                response
            }
        },
        "close_editor" => respond(bridge.stop().map(|outcome| {
            ToolResponse::success("Editor closed successfully", &json!({ "outcome": outcome }))
        })),
        "update_editor_script" => {
            let args: ScriptArgs = decode(name, arguments)?;
            respond(bridge.push_script(&args.script).map(|path| {
                ToolResponse::success(
                    "Script updated in editor",
                    &json!({ "script_file": path }),
                )
            }))
        }
        "sync_from_editor" => {
            // Text round-trip only: nothing is evaluated or registered
            let args: OptionalNameArgs = decode(name, arguments)?;
            let name = session.resolve_name(args.name.as_deref(), "synced");
            respond(bridge.pull_script().map(|script| {
                ToolResponse::success(
                    format!("Synced object from editor: {}", name),
                    &json!({ "object_id": name, "script": script }),
                )
            }))
        }
        "diagnose_editor" => {
            let diagnostics = bridge.diagnose();
            let found = diagnostics
                .candidates
                .iter()
                .filter(|c| c.resolved.is_some())
                .count();
            ToolResponse::success(
                format!(
                    "{} of {} launch candidate(s) found on PATH",
                    found,
                    diagnostics.candidates.len()
                ),
                &diagnostics,
            )
        }
        "save_model_for_editor" => {
            let args: ObjectNameArgs = decode(name, arguments)?;
            let destination = bridge.model_file().to_string_lossy().into_owned();
            respond(
                session
                    .export_step_with_path(&args.name, Some(&destination))
                    .map(|report| {
                        ToolResponse::success(
                            format!("Saved {} for the editor", args.name),
                            &report,
                        )
                    }),
            )
        }
        other => {
            return Err(ModelingError::UnknownTool {
                name: other.to_string(),
            })
        }
    };

    Ok(response)
}

/// `tools/list` entries: name, description, and JSON input schema.
pub fn tool_definitions() -> Vec<Value> {
    let name_only = |description: &str| {
        json!({
            "type": "object",
            "properties": { "name": { "type": "string", "description": description } },
            "required": ["name"],
        })
    };
    let no_arguments = json!({ "type": "object", "properties": {} });

    vec![
        tool(
            "create_workspace",
            "Create a new workspace and make it active",
            name_only("Name of the new workspace"),
        ),
        tool(
            "switch_workspace",
            "Switch to an existing workspace",
            name_only("Name of the workspace to activate"),
        ),
        tool(
            "list_workspaces",
            "List all workspaces and the active one",
            no_arguments.clone(),
        ),
        tool(
            "get_workspace_info",
            "Get detailed information about the current design workspace",
            no_arguments.clone(),
        ),
        tool(
            "create_box",
            "Create a box with given dimensions",
            json!({
                "type": "object",
                "properties": {
                    "width": { "type": "number", "default": 1.0, "description": "Width of the box" },
                    "length": { "type": "number", "default": 1.0, "description": "Length of the box" },
                    "height": { "type": "number", "default": 1.0, "description": "Height of the box" },
                    "centered": { "type": "boolean", "default": true, "description": "Whether the box is centered at origin" },
                    "name": { "type": "string", "description": "Name for the box object (optional)" },
                },
            }),
        ),
        tool(
            "create_cylinder",
            "Create a cylinder with given radius and height",
            json!({
                "type": "object",
                "properties": {
                    "radius": { "type": "number", "default": 1.0, "description": "Radius of the cylinder" },
                    "height": { "type": "number", "default": 1.0, "description": "Height of the cylinder" },
                    "centered": { "type": "boolean", "default": true, "description": "Whether the cylinder is centered at origin" },
                    "name": { "type": "string", "description": "Name for the cylinder object (optional)" },
                },
            }),
        ),
        tool(
            "boolean_operation",
            "Perform a boolean operation between two objects",
            json!({
                "type": "object",
                "properties": {
                    "operation": { "type": "string", "enum": ["union", "subtract", "intersect"] },
                    "target": { "type": "string", "description": "Name of the target object" },
                    "tool": { "type": "string", "description": "Name of the tool object" },
                    "name": { "type": "string", "description": "Name for the resulting object (optional)" },
                },
                "required": ["operation", "target", "tool"],
            }),
        ),
        tool(
            "export_object",
            "Export an object to the specified format",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Name of the object to export" },
                    "format": { "type": "string", "enum": ["stl", "step", "stp"], "default": "stl" },
                    "validate": { "type": "boolean", "default": true, "description": "Check STEP output after writing" },
                },
                "required": ["name"],
            }),
        ),
        tool(
            "export_step",
            "Export an object as a STEP file, optionally to an explicit path",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Name of the object to export" },
                    "filepath": { "type": "string", "description": "Destination path (optional)" },
                },
                "required": ["name"],
            }),
        ),
        tool(
            "execute_script",
            "Execute a modeling script and store the shape bound to 'result'",
            json!({
                "type": "object",
                "properties": {
                    "script": { "type": "string", "description": "Modeling script source" },
                    "name": { "type": "string", "description": "Name for the resulting object (optional)" },
                },
                "required": ["script"],
            }),
        ),
        tool(
            "render_object",
            "Render the current object to a PNG image",
            no_arguments.clone(),
        ),
        tool(
            "launch_editor",
            "Launch the external CAD editor on the shared script",
            no_arguments.clone(),
        ),
        tool(
            "close_editor",
            "Close the external CAD editor",
            no_arguments.clone(),
        ),
        tool(
            "update_editor_script",
            "Replace the script shared with the external editor",
            json!({
                "type": "object",
                "properties": { "script": { "type": "string", "description": "Script content" } },
                "required": ["script"],
            }),
        ),
        tool(
            "sync_from_editor",
            "Read back the script shared with the external editor (text only, nothing is registered)",
            json!({
                "type": "object",
                "properties": { "name": { "type": "string", "description": "Name for the synced object (optional)" } },
            }),
        ),
        tool(
            "diagnose_editor",
            "Report editor launch candidates, their PATH resolution and whether the editor runs",
            no_arguments,
        ),
        tool(
            "save_model_for_editor",
            "Export an object as STEP into the model file shared with the editor",
            name_only("Name of the object to save"),
        ),
    ]
}

fn tool(name: &str, description: &str, input_schema: Value) -> Value {
    json!({
        "name": name,
        "description": description,
        "inputSchema": input_schema,
    })
}
