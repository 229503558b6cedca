//! Exclusive highlight slot

use crate::host::{AppearanceSnapshot, InteractionHost, MaterialId};

/// Tracks the single highlighted object and how to undo its highlight
///
/// Highlighting is exclusive: moving the highlight restores the previous
/// object's appearance before the new one is touched.
#[derive(Debug, Clone)]
pub struct HighlightSlot<O> {
    current: Option<O>,
    snapshot: Option<AppearanceSnapshot>,
}

impl<O> Default for HighlightSlot<O> {
    fn default() -> Self {
        Self {
            current: None,
            snapshot: None,
        }
    }
}

impl<O: Copy + Eq> HighlightSlot<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The highlighted object
    pub fn current(&self) -> Option<O> {
        self.current
    }

    /// Move the highlight to `object`; returns true if the slot changed
    ///
    /// Without a material or an appearance capability the object is still
    /// tracked as highlighted, it just does not look different.
    pub fn highlight<H>(&mut self, host: &mut H, object: O, material: Option<MaterialId>) -> bool
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        if self.current == Some(object) {
            return false;
        }

        self.clear(host);
        self.current = Some(object);

        if let Some(material) = material {
            if let Some(appearance) = host.appearance_mut(object) {
                self.snapshot = Some(appearance.apply_override(material));
            }
        }
        true
    }

    /// Remove the highlight; returns true if something was highlighted
    pub fn clear<H>(&mut self, host: &mut H) -> bool
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        let Some(previous) = self.current.take() else {
            return false;
        };

        if let Some(snapshot) = self.snapshot.take() {
            if let Some(appearance) = host.appearance_mut(previous) {
                appearance.restore(snapshot);
            }
        }
        true
    }

    /// Drop bookkeeping for an object that no longer exists
    pub fn forget(&mut self, object: O) -> bool {
        if self.current == Some(object) {
            self.current = None;
            self.snapshot = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockHost, BASE_MATERIAL};

    const GLOW: MaterialId = MaterialId::HIGHLIGHT;

    #[test]
    fn test_highlight_appends_and_restores() {
        let mut host = MockHost::new();
        host.add(1);
        let mut slot = HighlightSlot::new();

        assert!(slot.highlight(&mut host, 1, Some(GLOW)));
        assert_eq!(host.materials(1), vec![BASE_MATERIAL, GLOW]);

        assert!(slot.clear(&mut host));
        assert_eq!(host.materials(1), vec![BASE_MATERIAL]);
        assert_eq!(slot.current(), None);
    }

    #[test]
    fn test_highlight_is_exclusive() {
        let mut host = MockHost::new();
        host.add(1);
        host.add(2);
        let mut slot = HighlightSlot::new();

        slot.highlight(&mut host, 1, Some(GLOW));
        slot.highlight(&mut host, 2, Some(GLOW));

        assert!(!host.is_highlighted(1, GLOW));
        assert!(host.is_highlighted(2, GLOW));
        assert_eq!(slot.current(), Some(2));
    }

    #[test]
    fn test_same_object_is_not_reapplied() {
        let mut host = MockHost::new();
        host.add(1);
        let mut slot = HighlightSlot::new();

        assert!(slot.highlight(&mut host, 1, Some(GLOW)));
        assert!(!slot.highlight(&mut host, 1, Some(GLOW)));
        assert_eq!(host.materials(1), vec![BASE_MATERIAL, GLOW]);
    }

    #[test]
    fn test_missing_renderer_still_tracks() {
        let mut host = MockHost::new();
        host.add(1).renderer = None;
        let mut slot = HighlightSlot::new();

        assert!(slot.highlight(&mut host, 1, Some(GLOW)));
        assert_eq!(slot.current(), Some(1));
        assert!(slot.clear(&mut host));
    }

    #[test]
    fn test_no_material_leaves_look_untouched() {
        let mut host = MockHost::new();
        host.add(1);
        let mut slot = HighlightSlot::new();

        slot.highlight(&mut host, 1, None);
        assert_eq!(host.materials(1), vec![BASE_MATERIAL]);
        assert_eq!(slot.current(), Some(1));
    }

    #[test]
    fn test_forget_skips_restore() {
        let mut host = MockHost::new();
        host.add(1);
        let mut slot = HighlightSlot::new();

        slot.highlight(&mut host, 1, Some(GLOW));
        assert!(slot.forget(1));
        assert!(!slot.clear(&mut host));
        assert!(host.is_highlighted(1, GLOW));
    }
}
