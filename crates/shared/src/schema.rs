use crate::{ChildSpec, MechSchema, PartSpec, Vec3Array};

fn child(id: &str, display_name: &str, dir: Vec3Array, distance: f32) -> ChildSpec {
    ChildSpec {
        id: id.to_string(),
        display_name: display_name.to_string(),
        explode_direction: dir,
        explode_distance: distance,
    }
}

fn part(
    id: &str,
    display_name: &str,
    dir: Vec3Array,
    distance: f32,
    ring_offset: Vec3Array,
    children: Vec<ChildSpec>,
) -> PartSpec {
    PartSpec {
        id: id.to_string(),
        display_name: display_name.to_string(),
        explode_direction: dir,
        explode_distance: distance,
        ring_offset,
        children,
    }
}

/// Стандартная схема меха: 7 основных деталей.
///
/// Порядок деталей важен: индекс в списке — это постоянный номер слота
/// во внешнем кольце и позиция при перелистывании.
pub fn standard_mech() -> MechSchema {
    MechSchema {
        version: 1,
        name: "Mech".to_string(),
        parts: vec![
            part(
                "Head",
                "Голова",
                [0.0, 1.0, 0.0],
                0.8,
                [0.0, -0.35, 0.0],
                vec![
                    child("Visor", "Визор", [0.0, 0.0, 1.0], 0.3),
                    child("Antenna", "Антенна", [0.0, 1.0, 0.0], 0.25),
                ],
            ),
            part(
                "Torso",
                "Корпус",
                [0.0, 0.0, 1.0],
                0.4,
                [0.0, -0.1, 0.0],
                vec![
                    child("Chestplate", "Нагрудник", [0.0, 0.0, 1.0], 0.4),
                    child("Core", "Реактор", [0.0, 0.3, 1.0], 0.2),
                    child("Waist", "Пояс", [0.0, -1.0, 0.0], 0.3),
                ],
            ),
            part(
                "Leftarm",
                "Левая рука",
                [-1.0, 0.2, 0.0],
                1.0,
                [0.45, 0.1, 0.0],
                vec![
                    child("Leftshoulder", "Левое плечо", [-0.3, 1.0, 0.0], 0.3),
                    child("Leftforearm", "Левое предплечье", [-1.0, -0.4, 0.0], 0.35),
                    child("Lefthand", "Левая кисть", [-0.4, -1.0, 0.0], 0.4),
                ],
            ),
            part(
                "Rightarm",
                "Правая рука",
                [1.0, 0.2, 0.0],
                1.0,
                [-0.45, 0.1, 0.0],
                vec![
                    child("Rightshoulder", "Правое плечо", [0.3, 1.0, 0.0], 0.3),
                    child("Rightforearm", "Правое предплечье", [1.0, -0.4, 0.0], 0.35),
                    child("Righthand", "Правая кисть", [0.4, -1.0, 0.0], 0.4),
                ],
            ),
            part(
                "Leftleg",
                "Левая нога",
                [-0.4, -1.0, 0.0],
                0.9,
                [0.2, 0.5, 0.0],
                vec![
                    child("Leftthigh", "Левое бедро", [-1.0, 0.2, 0.0], 0.3),
                    child("Leftshin", "Левая голень", [-0.5, -0.6, 0.5], 0.35),
                    child("Leftfoot", "Левая стопа", [0.0, -1.0, 0.4], 0.4),
                ],
            ),
            part(
                "Rightleg",
                "Правая нога",
                [0.4, -1.0, 0.0],
                0.9,
                [-0.2, 0.5, 0.0],
                vec![
                    child("Rightthigh", "Правое бедро", [1.0, 0.2, 0.0], 0.3),
                    child("Rightshin", "Правая голень", [0.5, -0.6, 0.5], 0.35),
                    child("Rightfoot", "Правая стопа", [0.0, -1.0, 0.4], 0.4),
                ],
            ),
            part(
                "Backpack",
                "Ранец",
                [0.0, 0.2, -1.0],
                1.2,
                [0.0, 0.0, 0.3],
                Vec::new(),
            ),
        ],
    }
}
