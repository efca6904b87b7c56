use serde::{Deserialize, Serialize};

use crate::coords::Vec2;

/// Named rotation anchor on the quad.
///
/// Rows map to y ∈ {0, h/2, h}, columns to x ∈ {0, w/2, w}, in local
/// (pre-rotation) quad space with the top-left corner at the origin.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PivotAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl PivotAnchor {
    /// Anchor position in local quad space for a quad of `size`.
    pub fn local_point(self, size: Vec2) -> Vec2 {
        use PivotAnchor::*;

        let x = match self {
            TopLeft | MiddleLeft | BottomLeft => 0.0,
            TopCenter | MiddleCenter | BottomCenter => size.x * 0.5,
            TopRight | MiddleRight | BottomRight => size.x,
        };
        let y = match self {
            TopLeft | TopCenter | TopRight => 0.0,
            MiddleLeft | MiddleCenter | MiddleRight => size.y * 0.5,
            BottomLeft | BottomCenter | BottomRight => size.y,
        };

        Vec2::new(x, y)
    }
}

/// The point a sprite rotates around.
///
/// Serialized either as a preset name (`"top-left"`, `"middle-center"`, …)
/// or as an explicit `{x, y}` offset measured from the quad's geometric
/// center.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pivot {
    Named(PivotAnchor),
    Offset { x: f32, y: f32 },
}

impl Pivot {
    /// Pivot position in local quad space for a quad of `size`.
    pub fn local_point(self, size: Vec2) -> Vec2 {
        match self {
            Pivot::Named(anchor) => anchor.local_point(size),
            Pivot::Offset { x, y } => Vec2::new(size.x * 0.5 + x, size.y * 0.5 + y),
        }
    }
}

impl Default for Pivot {
    fn default() -> Self {
        Pivot::Named(PivotAnchor::MiddleCenter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(40.0, 20.0);

    #[test]
    fn all_nine_anchors() {
        use PivotAnchor::*;

        let cases = [
            (TopLeft, 0.0, 0.0),
            (TopCenter, 20.0, 0.0),
            (TopRight, 40.0, 0.0),
            (MiddleLeft, 0.0, 10.0),
            (MiddleCenter, 20.0, 10.0),
            (MiddleRight, 40.0, 10.0),
            (BottomLeft, 0.0, 20.0),
            (BottomCenter, 20.0, 20.0),
            (BottomRight, 40.0, 20.0),
        ];
        for (anchor, x, y) in cases {
            assert_eq!(anchor.local_point(SIZE), Vec2::new(x, y), "{anchor:?}");
        }
    }

    #[test]
    fn offset_is_relative_to_center() {
        let pivot = Pivot::Offset { x: 5.0, y: -2.0 };
        assert_eq!(pivot.local_point(SIZE), Vec2::new(25.0, 8.0));
    }

    #[test]
    fn default_is_middle_center() {
        assert_eq!(Pivot::default().local_point(SIZE), Vec2::new(20.0, 10.0));
    }

    #[test]
    fn serde_preset_and_offset() {
        let named: Pivot = serde_json::from_str(r#""bottom-right""#).unwrap();
        assert_eq!(named, Pivot::Named(PivotAnchor::BottomRight));

        let offset: Pivot = serde_json::from_str(r#"{"x":3.0,"y":4.0}"#).unwrap();
        assert_eq!(offset, Pivot::Offset { x: 3.0, y: 4.0 });

        assert_eq!(serde_json::to_string(&named).unwrap(), r#""bottom-right""#);
    }
}
