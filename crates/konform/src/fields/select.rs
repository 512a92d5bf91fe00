//! Select field type.

use super::{FieldDefinition, FieldKind};

/// Creates a select field drawing its options from the named option source.
pub fn select(label: &str, option_source: &str) -> FieldDefinition {
    FieldDefinition::new(FieldKind::Select)
        .label(label)
        .option_source(option_source)
}
