use super::ids::{AssemblyId, AsymId, EntityId};

/// The part of the system an assembly component refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentRef {
    /// An entity that is known but has no modeled structure.
    Entity(EntityId),
    /// A modeled chain.
    Asym(AsymId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyComponent {
    pub component: ComponentRef,
    pub seq_id_range: Option<(usize, usize)>, // Inclusive residue range; `None` covers the whole entity
}

impl AssemblyComponent {
    pub fn entity(entity: EntityId) -> Self {
        Self {
            component: ComponentRef::Entity(entity),
            seq_id_range: None,
        }
    }

    pub fn asym(asym: AsymId) -> Self {
        Self {
            component: ComponentRef::Asym(asym),
            seq_id_range: None,
        }
    }

    pub fn with_range(mut self, seq_id_begin: usize, seq_id_end: usize) -> Self {
        self.seq_id_range = Some((seq_id_begin, seq_id_end));
        self
    }
}

impl From<EntityId> for AssemblyComponent {
    fn from(entity: EntityId) -> Self {
        Self::entity(entity)
    }
}

impl From<AsymId> for AssemblyComponent {
    fn from(asym: AsymId) -> Self {
        Self::asym(asym)
    }
}

/// A named collection of system parts that were modeled or characterized together.
///
/// Component order is not significant: components are put in canonical order on output,
/// and assemblies that end up with identical components share one ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    pub components: Vec<AssemblyComponent>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent: Option<AssemblyId>, // Immediate parent in an assembly hierarchy
}

impl Assembly {
    pub fn new<I, C>(components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<AssemblyComponent>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_parent(mut self, parent: AssemblyId) -> Self {
        self.parent = Some(parent);
        self
    }
}
