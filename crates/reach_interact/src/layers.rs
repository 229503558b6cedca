//! Interaction layers and ray filtering masks

use serde::{Deserialize, Serialize};

/// A layer identifier (0..=31)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionLayer(pub u32);

impl InteractionLayer {
    /// Default layer
    pub const DEFAULT: Self = Self(0);
    /// Objects rays pass through, whatever the query mask
    pub const IGNORE_RAYCAST: Self = Self(2);
    /// Objects that can be highlighted, grabbed and edited
    pub const INTERACTABLE: Self = Self(3);
    /// Controller anchors
    pub const CONTROLLERS: Self = Self(4);
    /// Menus and gizmos
    pub const UI: Self = Self(5);

    /// Create a custom layer
    pub const fn custom(id: u32) -> Self {
        Self(id)
    }

    /// Get the layer as a single-bit mask
    pub const fn as_mask(&self) -> LayerMask {
        LayerMask(1 << (self.0 & 31))
    }
}

impl Default for InteractionLayer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Set of layers a ray query accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Accepts every layer
    pub const ALL: Self = Self(u32::MAX);
    /// Accepts nothing
    pub const NONE: Self = Self(0);
    /// Only the interactable layer
    pub const INTERACTABLE: Self = InteractionLayer::INTERACTABLE.as_mask();

    /// Check if a layer passes this mask
    pub fn contains(&self, layer: InteractionLayer) -> bool {
        self.0 & layer.as_mask().0 != 0
    }

    /// Add a layer
    pub fn with(mut self, layer: InteractionLayer) -> Self {
        self.0 |= layer.as_mask().0;
        self
    }

    /// Remove a layer
    pub fn without(mut self, layer: InteractionLayer) -> Self {
        self.0 &= !layer.as_mask().0;
        self
    }

    /// True if no layer is accepted
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::INTERACTABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_membership() {
        let mask = LayerMask::INTERACTABLE.with(InteractionLayer::UI);

        assert!(mask.contains(InteractionLayer::INTERACTABLE));
        assert!(mask.contains(InteractionLayer::UI));
        assert!(!mask.contains(InteractionLayer::CONTROLLERS));
    }

    #[test]
    fn test_mask_with_without() {
        let mask = LayerMask::NONE
            .with(InteractionLayer::custom(7))
            .with(InteractionLayer::DEFAULT)
            .without(InteractionLayer::DEFAULT);

        assert!(mask.contains(InteractionLayer::custom(7)));
        assert!(!mask.contains(InteractionLayer::DEFAULT));
        assert!(LayerMask::NONE.is_empty());
        assert!(LayerMask::ALL.contains(InteractionLayer::CONTROLLERS));
    }
}
