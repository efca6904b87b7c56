use core::cmp::Ordering;

/// Stable draw-order key for a sprite.
///
/// Ordering rules:
/// 1) `z_order`: ascending (lower values draw behind higher ones)
/// 2) `order`: ascending registration index, so equal depths keep a stable
///    relative order across re-sorts
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub z_order: i32,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z_order: i32, order: u32) -> Self {
        Self { z_order, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match self.z_order.cmp(&other.z_order) {
            Ordering::Equal => self.order.cmp(&other.order),
            o => o,
        }
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
