//! Entity base contracts

use uuid::Uuid;

use super::notification::Notification;

/// Base contract for domain entities
///
/// Identity equality is the sole basis of entity equality; concrete
/// entities implement `PartialEq` over `entity_id` alone. `validate` is
/// pure: it returns a fresh [`Notification`] describing the entity's
/// current field errors and never mutates the entity.
pub trait Entity {
    /// The entity's globally-unique, immutable identifier
    fn entity_id(&self) -> Uuid;

    /// Check the entity's current state against its field constraints
    fn validate(&self) -> Notification;
}

/// Marker for aggregate roots: entities that own validation and are
/// the unit of persistence.
pub trait AggregateRoot: Entity {}
