use serde::{Deserialize, Serialize};

mod schema;

pub use schema::standard_mech;

/// Уникальный идентификатор детали модели
pub type PartId = String;

/// Трехмерный вектор в формате, удобном для JSON
pub type Vec3Array = [f32; 3];

/// Поза покоя узла, снимается один раз при загрузке ассета
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestPose {
    pub position: Vec3Array,
    pub rotation: Vec3Array,
    #[serde(default = "default_scale")]
    pub scale: Vec3Array,
}

fn default_scale() -> Vec3Array {
    [1.0, 1.0, 1.0]
}

impl RestPose {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: default_scale(),
        }
    }

    /// Поза покоя в заданной точке без поворота
    pub fn at(position: Vec3Array) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

impl Default for RestPose {
    fn default() -> Self {
        Self::new()
    }
}

/// Именованный узел, найденный загрузчиком в ассете
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredNode {
    pub name: String,
    #[serde(default)]
    pub rest: RestPose,
    /// Количество дочерних узлов (мешей) под этим узлом
    #[serde(default)]
    pub child_count: usize,
}

impl DiscoveredNode {
    pub fn new(name: impl Into<String>, rest: RestPose, child_count: usize) -> Self {
        Self {
            name: name.into(),
            rest,
            child_count,
        }
    }
}

/// Описание дочерней детали (подсборки)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildSpec {
    pub id: PartId,
    pub display_name: String,
    pub explode_direction: Vec3Array,
    pub explode_distance: f32,
}

/// Описание основной (верхнеуровневой) детали
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    pub id: PartId,
    pub display_name: String,
    pub explode_direction: Vec3Array,
    pub explode_distance: f32,
    /// Ручное смещение в раскладке по кольцам (центры масс у деталей разные)
    #[serde(default)]
    pub ring_offset: Vec3Array,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildSpec>,
}

/// Схема модели: упорядоченный список основных деталей с их подсборками
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechSchema {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    pub parts: Vec<PartSpec>,
}

fn default_version() -> u32 {
    1
}

impl Default for MechSchema {
    fn default() -> Self {
        standard_mech()
    }
}

impl MechSchema {
    /// Найти основную деталь по id (без учета регистра)
    pub fn find_part(&self, id: &str) -> Option<&PartSpec> {
        self.parts.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    /// Все id схемы: основные детали и их подсборки
    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for part in &self.parts {
            ids.push(part.id.as_str());
            for child in &part.children {
                ids.push(child.id.as_str());
            }
        }
        ids
    }

    /// Количество основных деталей
    pub fn major_count(&self) -> usize {
        self.parts.len()
    }
}

/// Уровень просмотра модели
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Assembled,
    Exploded,
    PartFocus,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Assembled => "assembled",
            ViewMode::Exploded => "exploded",
            ViewMode::PartFocus => "part_focus",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Направление перелистывания деталей
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleDirection {
    Prev,
    Next,
}
