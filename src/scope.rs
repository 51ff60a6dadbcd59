use floaters_core::SpriteId;

/// Holds a guard for exactly as long as a drag is active.
///
/// The guard is armed when a drag starts and dropped on the first frame the
/// scene reports no drag, or on teardown, whichever comes first.
pub struct DragScope<G> {
    guard: Option<G>,
}

impl<G> Default for DragScope<G> {
    fn default() -> Self {
        Self { guard: None }
    }
}

impl<G> DragScope<G> {
    /// Install `guard`, dropping any guard left over from an earlier drag.
    pub fn arm(&mut self, guard: G) {
        self.guard = Some(guard);
    }

    /// Drop the guard once the scene has no active drag. Returns true if a
    /// guard was released by this call.
    pub fn sync(&mut self, dragging: Option<SpriteId>) -> bool {
        if dragging.is_some() {
            return false;
        }
        self.disarm()
    }

    /// Drop the guard unconditionally.
    pub fn disarm(&mut self) -> bool {
        self.guard.take().is_some()
    }
}
