//! Injected callbacks for latency-sensitive edits.
//!
//! Reconciliation is the path of record for all state; these hooks fire
//! synchronously while a pass runs so a host can react immediately (say,
//! nudging a lighting uniform tied to a slider) instead of polling the
//! sprite set afterwards. There is no global lookup: the hooks are passed
//! to the scene manager at construction.

/// Receiver for per-field change notifications during reconciliation.
///
/// Every method has a no-op default; implement only what the host cares
/// about.
pub trait SceneHooks {
    fn transform_changed(&mut self, key: &str) {
        let _ = key;
    }

    fn z_order_changed(&mut self, key: &str, z_order: i32) {
        let _ = (key, z_order);
    }

    fn visibility_changed(&mut self, key: &str, visible: bool) {
        let _ = (key, visible);
    }

    fn normal_map_changed(&mut self, key: &str) {
        let _ = key;
    }
}

/// Hooks that ignore everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl SceneHooks for NoHooks {}
