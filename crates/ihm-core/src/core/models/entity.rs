use std::hash::{Hash, Hasher};

/// A distinct molecular sequence.
///
/// Entities compare equal when their sequences are equal; descriptive fields do not
/// participate, so two entities with the same sequence are duplicates of one another.
#[derive(Debug, Clone)]
pub struct Entity {
    pub sequence: String,                // One-letter amino-acid codes
    pub description: Option<String>,     // Free-text description (pdbx_description)
    pub details: Option<String>,         // Additional free-text details
    pub entity_type: String,             // mmCIF entity type, e.g. "polymer"
    pub src_method: String,              // How the entity was produced, e.g. "man"
    pub number_of_molecules: usize,      // Copies of the entity in the deposited model
    pub formula_weight: Option<f64>,     // Weight in Daltons, if known
}

impl Entity {
    pub fn new(sequence: &str) -> Self {
        Self {
            sequence: sequence.to_string(),
            description: None,
            details: None,
            entity_type: "polymer".to_string(),
            src_method: "man".to_string(),
            number_of_molecules: 1,
            formula_weight: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }

    /// Inclusive 1-based range covering the whole sequence.
    pub fn seq_id_range(&self) -> (usize, usize) {
        (1, self.sequence.chars().count())
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sequence.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_with_same_sequence_are_equal() {
        let a = Entity::new("ACG").with_description("foo");
        let b = Entity::new("ACG").with_description("bar");
        let c = Entity::new("ACGT");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn new_entity_uses_polymer_defaults() {
        let entity = Entity::new("AC");
        assert_eq!(entity.entity_type, "polymer");
        assert_eq!(entity.src_method, "man");
        assert_eq!(entity.number_of_molecules, 1);
        assert_eq!(entity.formula_weight, None);
        assert_eq!(entity.seq_id_range(), (1, 2));
    }
}
