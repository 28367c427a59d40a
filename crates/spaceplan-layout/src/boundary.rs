//! Bounding rectangle from shapes drawn on an external surface.
//!
//! Only the first shape is used. This is a deliberate convention, not a
//! union or bounding box of all shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use spaceplan_core::{BoundaryError, BoundaryRect};
use tracing::debug;

/// Shape kinds that can describe a boundary.
pub const BOUNDARY_KINDS: [&str; 3] = ["rectangle", "polygon", "ellipse"];

/// A shape as reported by the drawing surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default, alias = "w")]
    pub width: Option<f64>,
    #[serde(default, alias = "h")]
    pub height: Option<f64>,
    #[serde(default)]
    pub rotation: f64,
}

impl ShapeDescriptor {
    /// A rectangle shape.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind: Some("rectangle".to_string()),
            x,
            y,
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}

/// Anything that can report the shapes currently drawn.
///
/// Implemented by whatever handle the caller holds on its drawing surface;
/// the surface is always passed in explicitly.
pub trait ShapeSource {
    fn shapes(&self) -> Vec<ShapeDescriptor>;
}

impl ShapeSource for [ShapeDescriptor] {
    fn shapes(&self) -> Vec<ShapeDescriptor> {
        self.to_vec()
    }
}

impl ShapeSource for Vec<ShapeDescriptor> {
    fn shapes(&self) -> Vec<ShapeDescriptor> {
        self.clone()
    }
}

/// Read shape descriptors from loosely typed JSON.
///
/// `null` means no shapes. Anything other than an array of shape objects
/// is an [`BoundaryError::InvalidBoundaryFormat`].
pub fn parse_shapes(value: &Value) -> Result<Vec<ShapeDescriptor>, BoundaryError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(value.clone()).map_err(|err| {
            BoundaryError::InvalidBoundaryFormat {
                reason: err.to_string(),
            }
        }),
        other => Err(BoundaryError::InvalidBoundaryFormat {
            reason: format!("expected an array of shapes, found {}", json_kind(other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The bounding rectangle for a layout run: the first shape, or `default`
/// when there are none.
///
/// A missing, non-positive or non-finite size on the first shape falls back
/// to the matching dimension of `default`; a non-finite position to 0.
pub fn boundary_from_shapes(shapes: &[ShapeDescriptor], default: BoundaryRect) -> BoundaryRect {
    let Some(first) = shapes.first() else {
        debug!("no boundary shapes, using default rectangle");
        return default;
    };

    let usable = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
    let position = |v: f64| if v.is_finite() { v } else { 0.0 };

    BoundaryRect::new(
        position(first.x),
        position(first.y),
        usable(first.width).unwrap_or(default.width),
        usable(first.height).unwrap_or(default.height),
    )
}

/// Read the current shapes from `source` and derive the boundary.
pub fn capture_boundary<S: ShapeSource + ?Sized>(
    source: &S,
    default: BoundaryRect,
) -> BoundaryRect {
    boundary_from_shapes(&source.shapes(), default)
}

/// Whether the shapes can describe a boundary at all: at least one
/// rectangle, polygon or ellipse.
pub fn is_valid_boundary(shapes: &[ShapeDescriptor]) -> bool {
    shapes
        .iter()
        .filter_map(|shape| shape.kind.as_deref())
        .any(|kind| BOUNDARY_KINDS.contains(&kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEFAULT: BoundaryRect = BoundaryRect::new(200.0, 200.0, 600.0, 400.0);

    #[test]
    fn test_first_shape_wins() {
        let shapes = vec![
            ShapeDescriptor::rectangle(10.0, 20.0, 300.0, 150.0),
            ShapeDescriptor::rectangle(-500.0, -500.0, 5000.0, 5000.0),
        ];
        assert_eq!(
            boundary_from_shapes(&shapes, DEFAULT),
            BoundaryRect::new(10.0, 20.0, 300.0, 150.0)
        );
    }

    #[test]
    fn test_empty_uses_default() {
        assert_eq!(boundary_from_shapes(&[], DEFAULT), DEFAULT);
    }

    #[test]
    fn test_missing_size_falls_back() {
        let shapes =
            parse_shapes(&json!([{"id": "s1", "type": "rectangle", "x": 5, "width": 0}])).unwrap();
        assert_eq!(
            boundary_from_shapes(&shapes, DEFAULT),
            BoundaryRect::new(5.0, 0.0, 600.0, 400.0)
        );
    }

    #[test]
    fn test_parse_shapes() {
        let shapes = parse_shapes(&json!([
            {"id": "shape:a", "type": "rectangle", "x": 1, "y": 2, "w": 30, "h": 40, "rotation": 0},
            {"id": "shape:b", "type": "draw", "x": 0, "y": 0}
        ]))
        .unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].width, Some(30.0));
        assert_eq!(shapes[0].height, Some(40.0));
        assert_eq!(shapes[1].width, None);

        assert!(parse_shapes(&json!(null)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_format() {
        for value in [json!({"x": 1}), json!("rect"), json!([1, 2]), json!([{"x": "left"}])] {
            let err = parse_shapes(&value).unwrap_err();
            assert!(matches!(err, BoundaryError::InvalidBoundaryFormat { .. }));
        }
    }

    #[test]
    fn test_valid_boundary() {
        assert!(!is_valid_boundary(&[]));
        let draw = ShapeDescriptor {
            kind: Some("draw".into()),
            ..Default::default()
        };
        assert!(!is_valid_boundary(&[draw.clone()]));
        assert!(is_valid_boundary(&[draw, ShapeDescriptor::rectangle(0.0, 0.0, 1.0, 1.0)]));
    }

    struct Canvas {
        drawn: Vec<ShapeDescriptor>,
    }

    impl ShapeSource for Canvas {
        fn shapes(&self) -> Vec<ShapeDescriptor> {
            self.drawn.clone()
        }
    }

    #[test]
    fn test_capture_from_handle() {
        let canvas = Canvas {
            drawn: vec![ShapeDescriptor::rectangle(0.0, 0.0, 1000.0, 800.0)],
        };
        assert_eq!(
            capture_boundary(&canvas, DEFAULT),
            BoundaryRect::new(0.0, 0.0, 1000.0, 800.0)
        );
        let empty: Vec<ShapeDescriptor> = Vec::new();
        assert_eq!(capture_boundary(&empty, DEFAULT), DEFAULT);
        assert_eq!(capture_boundary(&empty[..], DEFAULT), DEFAULT);
    }
}
