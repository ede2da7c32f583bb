//! Upload tracking: which geometry revision the renderer has seen.

/// Revision bookkeeping for a mesh whose buffers are uploaded by an external renderer.
#[derive(Clone, Debug)]
pub struct MeshState {
    /// Bumped every time the CPU-side buffers change.
    revision: u64,
    /// Revision of the last buffers the renderer acknowledged.
    uploaded_revision: u64,
}

impl MeshState {
    /// A freshly built mesh: revision 1, nothing uploaded yet.
    pub fn new() -> Self {
        Self {
            revision: 1,
            uploaded_revision: 0,
        }
    }

    /// Record that positions/normals changed. Returns the new revision.
    pub fn mark_changed(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    /// Current CPU-side revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Last revision the renderer acknowledged.
    pub fn uploaded_revision(&self) -> u64 {
        self.uploaded_revision
    }

    /// Returns `true` while the renderer holds older buffers than the CPU.
    pub fn needs_upload(&self) -> bool {
        self.uploaded_revision != self.revision
    }

    /// Acknowledge that `revision` was uploaded.
    ///
    /// Acknowledging an older revision than one already acknowledged is ignored.
    pub fn mark_uploaded(&mut self, revision: u64) {
        debug_assert!(revision <= self.revision, "cannot upload a future revision");
        self.uploaded_revision = self.uploaded_revision.max(revision);
    }
}

impl Default for MeshState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mesh_needs_upload() {
        let state = MeshState::new();
        assert!(state.needs_upload(), "initial geometry has never been uploaded");
    }

    #[test]
    fn test_upload_clears_and_change_restores() {
        let mut state = MeshState::new();
        state.mark_uploaded(state.revision());
        assert!(!state.needs_upload());

        let rev = state.mark_changed();
        assert_eq!(rev, 2);
        assert!(state.needs_upload());

        state.mark_uploaded(rev);
        assert!(!state.needs_upload());
    }

    #[test]
    fn test_stale_acknowledgement_keeps_flag() {
        let mut state = MeshState::new();
        let old = state.mark_changed();
        state.mark_changed();
        state.mark_uploaded(old);
        assert!(state.needs_upload(), "a newer revision is still pending");
    }

    #[test]
    fn test_out_of_order_acknowledgement_ignored() {
        let mut state = MeshState::new();
        let first = state.revision();
        let second = state.mark_changed();
        state.mark_uploaded(second);
        state.mark_uploaded(first);
        assert_eq!(state.uploaded_revision(), second);
        assert!(!state.needs_upload());
    }
}
