//! Text field types.

use super::{FieldDefinition, FieldKind};

/// Creates a single-line text field.
pub fn text(label: &str) -> FieldDefinition {
    FieldDefinition::new(FieldKind::Text).label(label)
}

/// Creates a password field.
pub fn password(label: &str) -> FieldDefinition {
    FieldDefinition::new(FieldKind::Password).label(label)
}

/// Creates a textarea with the given dimensions.
pub fn textarea(label: &str, cols: u32, rows: u32) -> FieldDefinition {
    FieldDefinition::new(FieldKind::Textarea)
        .label(label)
        .size(cols, rows)
}
