use super::ids::EntityId;

/// One modeled chain instance of an [`Entity`](super::entity::Entity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsymUnit {
    pub entity: EntityId,        // Entity this chain is an instance of
    pub details: Option<String>, // Free-text details (_struct_asym.details)
}

impl AsymUnit {
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            details: None,
        }
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }
}
