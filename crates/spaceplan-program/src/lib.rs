//! Reading space programs produced by an external text generator.
//!
//! The generator's output is untrusted and inconsistently shaped. This
//! crate is the single place where it is coerced into canonical
//! [`SpaceNode`] trees:
//!
//! 1. **Extraction**: find the JSON in free text ([`extract_json_block`])
//! 2. **Unwrapping**: peel response envelopes ([`unwrap_envelope`])
//! 3. **Normalization**: locate the hierarchy and coerce every node ([`normalize_program`])
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use spaceplan_program::{read_program, NormalizeOptions};
//!
//! let raw = json!({"split": {"name": "root", "children": [{"name": "hall", "final": "TRUE"}]}});
//! let program = read_program(&raw, &NormalizeOptions::default()).unwrap();
//! assert!(program.root.children[0].is_final);
//! ```

mod demo;
mod envelope;
mod normalize;

pub use demo::demo_program;
pub use envelope::{extract_json_block, unwrap_envelope};
pub use normalize::{
    coerce_angle, coerce_area, coerce_number, normalize_node, normalize_program, NormalizeOptions,
    Normalized, RootConvention, DEFAULT_ANGLE, DEFAULT_AREA, DEFAULT_MAX_DEPTH, DEFAULT_NAME,
};

use serde_json::Value;
use spaceplan_core::{ProgramError, SpaceNode};

/// Unwrap a generator response and normalize the program inside it.
pub fn read_program(
    response: &Value,
    options: &NormalizeOptions,
) -> Result<Normalized, ProgramError> {
    let inner = unwrap_envelope(response)?;
    normalize_program(&inner, options)
}

/// Extract, unwrap and normalize the program in free generator text.
pub fn read_program_text(
    text: &str,
    options: &NormalizeOptions,
) -> Result<Normalized, ProgramError> {
    let value = extract_json_block(text)?;
    read_program(&value, options)
}
