use shared::PartId;

/// Pointer-level selection: what is hovered and which sub-part is picked.
///
/// Pure UI annotation; nothing here moves parts.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    hovered: Option<PartId>,
    selected_child: Option<PartId>,
    /// Version counter for selection changes (for cache invalidation)
    version: u64,
}

impl SelectionState {
    /// Currently hovered part
    pub fn hovered(&self) -> Option<&PartId> {
        self.hovered.as_ref()
    }

    /// Picked sub-part of the focused part
    pub fn selected_child(&self) -> Option<&PartId> {
        self.selected_child.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Set the hovered part. Returns true if it changed.
    pub fn set_hovered(&mut self, id: Option<PartId>) -> bool {
        if self.hovered == id {
            return false;
        }
        self.hovered = id;
        self.version += 1;
        true
    }

    /// Pick a sub-part. Returns true if it changed.
    pub fn select_child(&mut self, id: PartId) -> bool {
        if self.selected_child.as_ref() == Some(&id) {
            return false;
        }
        self.selected_child = Some(id);
        self.version += 1;
        true
    }

    pub fn clear_child(&mut self) {
        if self.selected_child.take().is_some() {
            self.version += 1;
        }
    }
}
