//! Coercion of loosely-shaped generator output into [`SpaceNode`] trees.
//!
//! The generator may put the hierarchy under `split`, `root`,
//! `floorPlan.root`, emit a flat `rooms` list, or return the root node
//! itself. Scalars arrive as numbers, booleans or strings. Everything is
//! coerced here so that later stages only ever see canonical nodes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use spaceplan_core::{ProgramError, SpaceNode};
use tracing::{debug, warn};

use crate::demo::demo_program;

/// Area given to nodes whose area is missing or unusable.
pub const DEFAULT_AREA: f64 = 100.0;

/// Angle given to nodes whose angle is missing or unusable.
pub const DEFAULT_ANGLE: f64 = 0.0;

/// Name given to nodes without one.
pub const DEFAULT_NAME: &str = "unnamed";

/// Default nesting limit while normalizing.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Options for normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Return the built-in sample program instead of an error when no
    /// hierarchy is found.
    pub demo_fallback: bool,
    /// Nodes below this depth are not read; keep it equal to the layout limit.
    pub max_depth: u32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            demo_fallback: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl NormalizeOptions {
    /// Enable or disable the demo fallback.
    pub fn with_demo_fallback(mut self, demo_fallback: bool) -> Self {
        self.demo_fallback = demo_fallback;
        self
    }

    /// Set the nesting limit.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Which convention the hierarchy was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootConvention {
    /// `{"split": {...}}`
    Split,
    /// `{"root": {...}}`
    Root,
    /// `{"floorPlan": {"root": {...}}}`
    FloorPlanRoot,
    /// `{"rooms": [...]}`, wrapped in a synthetic root
    Rooms,
    /// The input is itself a node named or typed `root`
    SelfRoot,
    /// Nothing matched and the demo fallback was used
    Demo,
}

/// A normalized program and where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub root: SpaceNode,
    pub convention: RootConvention,
}

/// Locate the hierarchy in `input` and normalize it.
pub fn normalize_program(
    input: &Value,
    options: &NormalizeOptions,
) -> Result<Normalized, ProgramError> {
    let located = locate_root(input, options.max_depth);

    let (root, convention) = match located {
        Some(found) => found,
        None if options.demo_fallback => {
            warn!("no hierarchy in generator output, using demo program");
            (demo_program(), RootConvention::Demo)
        }
        None => {
            let keys = input
                .as_object()
                .map(|obj| obj.keys().cloned().collect())
                .unwrap_or_default();
            return Err(ProgramError::NoValidHierarchy { keys });
        }
    };

    debug!(
        convention = ?convention,
        nodes = root.node_count(),
        "normalized space program"
    );
    Ok(Normalized { root, convention })
}

fn locate_root(input: &Value, max_depth: u32) -> Option<(SpaceNode, RootConvention)> {
    let obj = input.as_object()?;

    if let Some(node) = obj.get("split").and_then(|v| normalize_node(v, max_depth)) {
        return Some((node, RootConvention::Split));
    }
    if let Some(node) = obj.get("root").and_then(|v| normalize_node(v, max_depth)) {
        return Some((node, RootConvention::Root));
    }
    if let Some(node) = obj
        .get("floorPlan")
        .and_then(|plan| plan.get("root"))
        .and_then(|v| normalize_node(v, max_depth))
    {
        return Some((node, RootConvention::FloorPlanRoot));
    }
    if let Some(rooms) = obj.get("rooms").and_then(Value::as_array) {
        return Some((wrap_rooms(rooms), RootConvention::Rooms));
    }
    if is_named_root(obj) {
        return normalize_node(input, max_depth).map(|node| (node, RootConvention::SelfRoot));
    }
    None
}

fn is_named_root(obj: &Map<String, Value>) -> bool {
    ["name", "type"]
        .iter()
        .any(|key| obj.get(*key).and_then(Value::as_str) == Some("root"))
}

/// Build a synthetic root over a flat list of rooms.
fn wrap_rooms(rooms: &[Value]) -> SpaceNode {
    let children: Vec<SpaceNode> = rooms
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| {
            let kind = node_kind(obj);
            let name = node_name(obj)
                .or_else(|| kind.clone())
                .unwrap_or_else(|| "room".to_string());
            SpaceNode {
                name,
                kind,
                area: coerce_area(obj.get("area")),
                angle: coerce_angle(obj.get("angle")),
                is_final: true,
                children: Vec::new(),
            }
        })
        .collect();

    let area = children.iter().map(|c| c.area).sum();
    SpaceNode::split("root", area, DEFAULT_ANGLE, children)
}

/// Normalize a single node and its descendants.
///
/// Returns `None` when `value` is not an object. Nodes at depth
/// `max_depth` keep no children and are never inferred final, so a layout
/// walk with the same limit still rejects the overflowing branch.
pub fn normalize_node(value: &Value, max_depth: u32) -> Option<SpaceNode> {
    normalize_at(value, 0, max_depth)
}

fn normalize_at(value: &Value, depth: u32, max_depth: u32) -> Option<SpaceNode> {
    let obj = value.as_object()?;
    let name = node_name(obj).unwrap_or_else(|| DEFAULT_NAME.to_string());

    let raw_children = obj.get("children").and_then(Value::as_array);
    let truncated = depth >= max_depth && raw_children.is_some_and(|raw| !raw.is_empty());

    let mut children = match raw_children {
        Some(_) if truncated => {
            warn!(node = %name, depth, "nesting beyond maximum depth, children not read");
            Vec::new()
        }
        Some(raw) => {
            let children: Vec<SpaceNode> = raw
                .iter()
                .filter_map(|child| normalize_at(child, depth + 1, max_depth))
                .collect();
            if children.len() < raw.len() {
                let dropped = raw.len() - children.len();
                debug!(node = %name, dropped, "dropped non-object children");
            }
            children
        }
        None => Vec::new(),
    };

    let is_final = match obj.get("final") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag.trim().eq_ignore_ascii_case("true"),
        _ => children.is_empty() && !truncated,
    };

    if is_final && !children.is_empty() {
        warn!(node = %name, count = children.len(), "final node carried children, dropping them");
        children.clear();
    }

    Some(SpaceNode {
        name,
        kind: node_kind(obj),
        area: coerce_area(obj.get("area")),
        angle: coerce_angle(obj.get("angle")),
        is_final,
        children,
    })
}

fn node_name(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("name")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn node_kind(obj: &Map<String, Value>) -> Option<String> {
    ["roomType", "type"]
        .iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Area of a node: a non-negative number, else [`DEFAULT_AREA`].
pub fn coerce_area(value: Option<&Value>) -> f64 {
    coerce_number(value)
        .filter(|area| *area >= 0.0)
        .unwrap_or(DEFAULT_AREA)
}

/// Angle of a node in radians, else [`DEFAULT_ANGLE`].
pub fn coerce_angle(value: Option<&Value>) -> f64 {
    coerce_number(value).unwrap_or(DEFAULT_ANGLE)
}

/// Read a finite number from a JSON number or a numeric string.
///
/// Strings are read like a lenient float parser: leading whitespace is
/// skipped and the longest numeric prefix is used, so `"120 m2"` is 120.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    // Exponent only counts when followed by at least one digit.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
