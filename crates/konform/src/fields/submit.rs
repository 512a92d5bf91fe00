//! Submit button.

use super::{FieldDefinition, FieldKind};

/// Creates a submit button.
pub fn submit(label: &str) -> FieldDefinition {
    FieldDefinition::new(FieldKind::Submit).label(label)
}
