//! Anonymization operator construction

use crate::redaction::models::{AnonymizationOperator, DetectedEntity, OperatorMap};

/// Placeholder a remote operator inserts for an entity type
pub fn operator_placeholder(entity_type: &str) -> String {
    format!("[{}_REDACTED]", entity_type.to_uppercase())
}

/// Build one replace operator per distinct entity type
///
/// Keys are the entity types exactly as the analyzer reported them; the
/// replacement value uses the upper-cased type.
pub fn build_operators(entities: &[DetectedEntity]) -> OperatorMap {
    entities
        .iter()
        .map(|entity| {
            (
                entity.entity_type.clone(),
                AnonymizationOperator::replace(operator_placeholder(&entity.entity_type)),
            )
        })
        .collect()
}
