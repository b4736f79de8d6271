//! Part registry: which named parts exist and how they are related.
//!
//! Built once from the schema and the node names the asset loader found.
//! Names are matched case-insensitively; nodes that match nothing in the
//! schema (lights, armatures, decorative meshes) are ignored.

use std::collections::{HashMap, HashSet};

use glam::Vec3;
use shared::{DiscoveredNode, MechSchema, PartId};

use crate::anim::PartPose;
use crate::error::{not_found, ViewerError, ViewerResult};

/// A registered part with its hierarchy and explosion metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub id: PartId,
    pub display_name: String,
    /// Major part owning this sub-part (None for major parts)
    pub parent_id: Option<PartId>,
    /// Unit vector
    pub explode_direction: Vec3,
    pub explode_distance: f32,
    /// Manual offset applied in the ring layout
    pub ring_offset: Vec3,
    /// Rest pose captured at load
    pub rest: PartPose,
    /// Child node count reported by the asset provider
    pub child_count: usize,
    /// Node name as found in the asset
    pub node_name: String,
}

impl Part {
    pub fn is_major(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Major parts in schema order and their sub-parts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    pub major: Vec<PartId>,
    pub children: HashMap<PartId, Vec<PartId>>,
}

/// Immutable id -> part lookup
#[derive(Debug, Clone)]
pub struct PartRegistry {
    parts: HashMap<PartId, Part>,
    hierarchy: Hierarchy,
    /// Lowercased name -> canonical id
    lookup: HashMap<String, PartId>,
    model_name: String,
}

fn key(name: &str) -> String {
    name.to_ascii_lowercase()
}

fn validate_schema(schema: &MechSchema) -> ViewerResult<()> {
    let mut seen = HashSet::new();
    for id in schema.all_ids() {
        if id.trim().is_empty() {
            return Err(ViewerError::InvalidSchema("empty part id".into()));
        }
        if !seen.insert(key(id)) {
            return Err(ViewerError::InvalidSchema(format!(
                "part id '{id}' appears more than once"
            )));
        }
    }
    Ok(())
}

impl PartRegistry {
    /// Cross-reference discovered nodes against the schema
    pub fn from_discovered(schema: &MechSchema, nodes: &[DiscoveredNode]) -> ViewerResult<Self> {
        validate_schema(schema)?;

        let mut found: HashMap<String, &DiscoveredNode> = HashMap::new();
        for node in nodes {
            found.entry(key(&node.name)).or_insert(node);
        }

        let mut registry = Self {
            parts: HashMap::new(),
            hierarchy: Hierarchy::default(),
            lookup: HashMap::new(),
            model_name: schema.name.clone(),
        };

        for spec in &schema.parts {
            let Some(node) = found.get(&key(&spec.id)) else {
                tracing::debug!("Schema part '{}' missing from asset", spec.id);
                continue;
            };

            let mut child_ids = Vec::new();
            for child in &spec.children {
                let Some(child_node) = found.get(&key(&child.id)) else {
                    tracing::debug!("Sub-part '{}' of '{}' missing from asset", child.id, spec.id);
                    continue;
                };
                registry.insert(Part {
                    id: child.id.clone(),
                    display_name: child.display_name.clone(),
                    parent_id: Some(spec.id.clone()),
                    explode_direction: Vec3::from(child.explode_direction).normalize_or_zero(),
                    explode_distance: child.explode_distance,
                    ring_offset: Vec3::ZERO,
                    rest: child_node.rest.into(),
                    child_count: child_node.child_count,
                    node_name: child_node.name.clone(),
                });
                child_ids.push(child.id.clone());
            }

            registry.insert(Part {
                id: spec.id.clone(),
                display_name: spec.display_name.clone(),
                parent_id: None,
                explode_direction: Vec3::from(spec.explode_direction).normalize_or_zero(),
                explode_distance: spec.explode_distance,
                ring_offset: Vec3::from(spec.ring_offset),
                rest: node.rest.into(),
                child_count: node.child_count,
                node_name: node.name.clone(),
            });
            registry.hierarchy.major.push(spec.id.clone());
            if !child_ids.is_empty() {
                registry.hierarchy.children.insert(spec.id.clone(), child_ids);
            }
        }

        for node in nodes {
            if !registry.lookup.contains_key(&key(&node.name)) {
                tracing::debug!("Ignoring unregistered node '{}'", node.name);
            }
        }

        if registry.hierarchy.major.is_empty() {
            return Err(ViewerError::EmptyModel(schema.name.clone()));
        }

        tracing::info!(
            "Registered {} parts ({} major) for '{}'",
            registry.parts.len(),
            registry.hierarchy.major.len(),
            schema.name
        );
        Ok(registry)
    }

    fn insert(&mut self, part: Part) {
        self.lookup.insert(key(&part.id), part.id.clone());
        self.parts.insert(part.id.clone(), part);
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Look up a part by canonical id
    pub fn get(&self, id: &str) -> ViewerResult<&Part> {
        self.parts.get(id).ok_or_else(|| not_found(id))
    }

    /// Case-insensitive name -> canonical id
    pub fn resolve(&self, name: &str) -> Option<&PartId> {
        self.lookup.get(&key(name))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.parts.contains_key(id)
    }

    pub fn major_parts(&self) -> &[PartId] {
        &self.hierarchy.major
    }

    pub fn major_count(&self) -> usize {
        self.hierarchy.major.len()
    }

    pub fn is_major(&self, id: &str) -> bool {
        self.parts.get(id).is_some_and(Part::is_major)
    }

    /// Registered sub-parts of a major part (empty for leaves and unknown ids)
    pub fn children_of(&self, id: &str) -> &[PartId] {
        self.hierarchy
            .children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn parent_of(&self, id: &str) -> Option<&PartId> {
        self.parts.get(id)?.parent_id.as_ref()
    }

    /// Permanent secondary-ring slot of a major part
    pub fn slot_index(&self, id: &str) -> Option<usize> {
        self.hierarchy.major.iter().position(|m| m == id)
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
