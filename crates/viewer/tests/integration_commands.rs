//! Integration tests for the JSON command protocol.

use mech_viewer_lib::command::{execute_json, execute_json_batch};
use mech_viewer_lib::harness::ViewerHarness;
use mech_viewer_lib::settings::ViewerSettings;
use shared::{MechSchema, ViewMode};

#[test]
fn test_json_session_focus_drill_back() {
    let mut h = ViewerHarness::new().unwrap();
    let script = r#"[
        {"command": "adjust_explosion", "delta": 0.5},
        {"command": "adjust_explosion", "delta": 0.5},
        {"command": "settle"},
        {"command": "hover", "id": "head"},
        {"command": "activate"},
        {"command": "select", "id": "Head"},
        {"command": "select", "id": "Visor"},
        {"command": "go_back"},
        {"command": "go_back"},
        {"command": "settle"},
        {"command": "inspect"}
    ]"#;
    let r = execute_json_batch(&mut h, script).unwrap();
    assert_eq!(r.len(), 11);
    assert!(r.iter().all(|r| r.success), "{r:?}");

    assert_eq!(r[1].data.as_ref().unwrap()["target"], 1.0);
    assert_eq!(r[3].data.as_ref().unwrap()["hovered"], "Head");
    assert_eq!(r[4].data.as_ref().unwrap()["focused"], "Head");
    assert_eq!(r[5].data.as_ref().unwrap()["drilled"], true);
    assert_eq!(r[6].data.as_ref().unwrap()["accepted"], true);
    assert_eq!(r[7].data.as_ref().unwrap()["mode"], "part_focus");
    assert_eq!(r[8].data.as_ref().unwrap()["mode"], "assembled");

    let inspect = r[10].data.as_ref().unwrap();
    assert_eq!(inspect["mode"], "assembled");
    assert!(inspect["focused"].is_null());
    assert_eq!(inspect["global"]["current"], 0.0);
    assert_eq!(inspect["interactable"].as_array().unwrap().len(), 0);
}

#[test]
fn test_json_cycle_and_activate_pointer() {
    let mut h = ViewerHarness::new().unwrap();
    let script = r#"[
        {"command": "set_explosion", "value": 1.0},
        {"command": "tick", "frames": 30},
        {"command": "cycle", "direction": "prev"},
        {"command": "activate"}
    ]"#;
    let r = execute_json_batch(&mut h, script).unwrap();
    assert_eq!(r[2].data.as_ref().unwrap()["part"], "Backpack");
    assert_eq!(r[2].data.as_ref().unwrap()["index"], 6);
    assert_eq!(r[3].data.as_ref().unwrap()["focused"], "Backpack");
    assert_eq!(h.machine.mode(), ViewMode::PartFocus);
}

#[test]
fn test_json_reset_collapses() {
    let mut h = ViewerHarness::new().unwrap();
    execute_json(&mut h, r#"{"command": "set_explosion", "value": 1.0}"#).unwrap();
    execute_json(&mut h, r#"{"command": "settle"}"#).unwrap();
    execute_json(&mut h, r#"{"command": "select", "id": "Torso"}"#).unwrap();
    let resp = execute_json(&mut h, r#"{"command": "reset"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(h.machine.mode(), ViewMode::Assembled);
}

#[test]
fn test_json_unknown_part_is_not_an_error() {
    let mut h = ViewerHarness::new().unwrap();
    execute_json(&mut h, r#"{"command": "set_explosion", "value": 1.0}"#).unwrap();
    let resp = execute_json(&mut h, r#"{"command": "select", "id": "Tail"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["accepted"], false);
}

#[test]
fn test_custom_schema_from_json() {
    let schema: MechSchema = serde_json::from_str(
        r#"{
            "name": "Walker",
            "parts": [
                {"id": "Hull", "display_name": "Hull", "explode_direction": [0, 1, 0], "explode_distance": 1.0},
                {"id": "Leg", "display_name": "Leg", "explode_direction": [0, -1, 0], "explode_distance": 0.5,
                 "children": [{"id": "Foot", "display_name": "Foot", "explode_direction": [0, -1, 0], "explode_distance": 0.2}]}
            ]
        }"#,
    )
    .unwrap();
    let mut h = ViewerHarness::with_schema(&schema, ViewerSettings::default()).unwrap();
    assert_eq!(h.major_parts(), vec!["Hull".to_string(), "Leg".to_string()]);

    let r = execute_json_batch(
        &mut h,
        r#"[
            {"command": "set_explosion", "value": 1.0},
            {"command": "settle"},
            {"command": "select", "id": "Leg"},
            {"command": "select", "id": "Leg"},
            {"command": "inspect"}
        ]"#,
    )
    .unwrap();
    let inspect = r[4].data.as_ref().unwrap();
    assert_eq!(inspect["model"], "Walker");
    assert_eq!(inspect["drilled"], true);
    assert!(inspect["interactable"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v == "Foot"));
}
