use std::collections::BTreeMap;

use wasm_bindgen::prelude::*;

use mech_viewer_lib::anim::PartPose;
use mech_viewer_lib::handle::InMemoryAsset;
use mech_viewer_lib::settings::ViewerSettings;
use mech_viewer_lib::{NavigationCommands, ViewStateMachine};
use shared::{standard_mech, CycleDirection, DiscoveredNode, MechSchema};

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Разбирает схему; пустая строка означает стандартного меха
fn parse_schema(schema_json: &str) -> Result<MechSchema, JsError> {
    if schema_json.trim().is_empty() {
        return Ok(standard_mech());
    }
    serde_json::from_str(schema_json).map_err(js_err)
}

/// Позы в формате, удобном для three.js: массивы вместо структур
#[derive(serde::Serialize)]
struct PoseDto {
    position: [f32; 3],
    rotation: [f32; 3],
    scale: [f32; 3],
}

impl From<&PartPose> for PoseDto {
    fn from(p: &PartPose) -> Self {
        Self {
            position: p.position.to_array(),
            rotation: p.rotation.to_array(),
            scale: p.scale.to_array(),
        }
    }
}

/// Вьюер меха для браузера.
///
/// Загрузчик ассета на стороне JS передаёт список найденных узлов с позами
/// покоя, затем каждый кадр вызывает `update(dt)` и читает `poses_json()`.
#[wasm_bindgen]
pub struct MechViewer {
    machine: ViewStateMachine,
}

#[wasm_bindgen]
impl MechViewer {
    /// Создаёт вьюер по схеме и узлам, найденным в ассете
    #[wasm_bindgen(constructor)]
    pub fn new(schema_json: &str, nodes_json: &str) -> Result<MechViewer, JsError> {
        let schema = parse_schema(schema_json)?;
        let nodes: Vec<DiscoveredNode> = serde_json::from_str(nodes_json).map_err(js_err)?;
        let asset = InMemoryAsset::from_nodes(nodes);
        let mut machine =
            ViewStateMachine::from_asset(&schema, &asset, ViewerSettings::default())
                .map_err(js_err)?;
        machine.on_diagnostic(|e| {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        });
        Ok(Self { machine })
    }

    /// Подписка на события состояния; колбэк получает JSON-строку
    pub fn on_event(&mut self, callback: js_sys::Function) {
        self.machine.on_event(move |event| {
            let Ok(json) = serde_json::to_string(event) else {
                return;
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                web_sys::console::error_1(&e);
            }
        });
    }

    pub fn adjust_explosion(&mut self, delta: f32) -> f32 {
        self.machine.adjust_explosion(delta)
    }

    pub fn set_explosion(&mut self, value: f32) -> f32 {
        self.machine.set_explosion(value)
    }

    pub fn select_part(&mut self, id: &str) -> bool {
        self.machine.select_part(id)
    }

    /// Переход к следующей (`forward = true`) или предыдущей детали
    pub fn cycle(&mut self, forward: bool) -> Option<String> {
        let direction = if forward {
            CycleDirection::Next
        } else {
            CycleDirection::Prev
        };
        self.machine.cycle(direction)
    }

    pub fn go_back(&mut self) -> bool {
        self.machine.go_back()
    }

    pub fn set_hovered_part(&mut self, id: Option<String>) -> bool {
        self.machine.set_hovered_part(id.as_deref())
    }

    /// Выбор детали под курсором, иначе под указателем навигации
    pub fn activate(&mut self) -> bool {
        self.machine.activate_hovered() || self.machine.activate_highlighted()
    }

    pub fn reset_view(&mut self) {
        self.machine.reset_view();
    }

    /// Один кадр анимации; `dt` в секундах
    pub fn update(&mut self, dt: f32) {
        self.machine.update(dt);
    }

    pub fn mode(&self) -> String {
        self.machine.mode().as_str().to_string()
    }

    pub fn focused_part(&self) -> Option<String> {
        self.machine.focused_part().cloned()
    }

    pub fn hovered_part(&self) -> Option<String> {
        self.machine.hovered_part().cloned()
    }

    pub fn is_settled(&self) -> bool {
        self.machine.is_settled()
    }

    /// Детали, доступные для наведения и выбора, JSON-массив
    pub fn interactable_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.machine.interactable_parts()).map_err(js_err)
    }

    /// Позы всех деталей по имени узла ассета
    pub fn poses_json(&self) -> Result<String, JsError> {
        let poses: BTreeMap<&str, PoseDto> = self
            .machine
            .registry()
            .parts()
            .filter_map(|part| {
                self.machine
                    .pose(&part.id)
                    .map(|pose| (part.node_name.as_str(), PoseDto::from(pose)))
            })
            .collect();
        serde_json::to_string(&poses).map_err(js_err)
    }
}

/// Схема стандартного меха в JSON, как отправная точка для своих схем
#[wasm_bindgen]
pub fn standard_mech_json() -> Result<String, JsError> {
    serde_json::to_string(&standard_mech()).map_err(js_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_empty_is_standard() {
        let Ok(schema) = parse_schema("  ") else {
            panic!("empty schema should fall back to the standard mech");
        };
        assert_eq!(schema, standard_mech());
    }

    #[test]
    fn test_pose_dto_arrays() {
        let pose = PartPose::identity();
        let json = serde_json::to_value(PoseDto::from(&pose)).unwrap();
        assert_eq!(json["scale"], serde_json::json!([1.0, 1.0, 1.0]));
    }
}
