use super::asym::AsymUnit;
use super::assembly::{Assembly, ComponentRef};
use super::entity::Entity;
use super::ids::{AssemblyId, AsymId, EntityId};
use super::location::{Location, Repository};
use super::software::Software;
use slotmap::SlotMap;
use std::io;

/// A complete modeled system, the unit written as one mmCIF data block.
///
/// Entities, asym units and assemblies are stored in slot maps and remembered in
/// insertion order, which is the order they are written in. The system is never modified
/// by export: every ID assigned on output lives in the export context instead.
#[derive(Debug, Clone)]
pub struct System {
    /// Name of the system, used as the data block name and `_entry.id`.
    pub name: String,
    /// Software used in the modeling, in output order.
    pub software: Vec<Software>,
    /// Locations of all external resources.
    pub locations: Vec<Location>,
    entities: SlotMap<EntityId, Entity>,
    entity_order: Vec<EntityId>,
    asym_units: SlotMap<AsymId, AsymUnit>,
    asym_order: Vec<AsymId>,
    assemblies: SlotMap<AssemblyId, Assembly>,
    assembly_order: Vec<AssemblyId>,
}

impl Default for System {
    fn default() -> Self {
        Self::new("model")
    }
}

impl System {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            software: Vec::new(),
            locations: Vec::new(),
            entities: SlotMap::with_key(),
            entity_order: Vec::new(),
            asym_units: SlotMap::with_key(),
            asym_order: Vec::new(),
            assemblies: SlotMap::with_key(),
            assembly_order: Vec::new(),
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn asym_unit(&self, id: AsymId) -> Option<&AsymUnit> {
        self.asym_units.get(id)
    }

    pub fn assembly(&self, id: AssemblyId) -> Option<&Assembly> {
        self.assemblies.get(id)
    }

    /// Returns an iterator over all entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entity_order
            .iter()
            .filter_map(|&id| self.entities.get(id).map(|e| (id, e)))
    }

    /// Returns an iterator over all asym units in insertion order.
    pub fn asym_units(&self) -> impl Iterator<Item = (AsymId, &AsymUnit)> {
        self.asym_order
            .iter()
            .filter_map(|&id| self.asym_units.get(id).map(|a| (id, a)))
    }

    /// Returns an iterator over all assemblies in insertion order.
    pub fn assemblies(&self) -> impl Iterator<Item = (AssemblyId, &Assembly)> {
        self.assembly_order
            .iter()
            .filter_map(|&id| self.assemblies.get(id).map(|a| (id, a)))
    }

    pub fn entity_count(&self) -> usize {
        self.entity_order.len()
    }

    pub fn asym_unit_count(&self) -> usize {
        self.asym_order.len()
    }

    pub fn assembly_count(&self) -> usize {
        self.assembly_order.len()
    }

    /// Adds an entity to the system.
    ///
    /// Duplicate sequences are accepted here and rejected when the system is exported.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = self.entities.insert(entity);
        self.entity_order.push(id);
        id
    }

    /// Adds a chain instance of an existing entity.
    ///
    /// # Return
    ///
    /// Returns `Some(AsymId)` if successful, otherwise `None` (the entity is not part of
    /// this system).
    pub fn add_asym_unit(&mut self, asym: AsymUnit) -> Option<AsymId> {
        self.entities.get(asym.entity)?;
        let id = self.asym_units.insert(asym);
        self.asym_order.push(id);
        Some(id)
    }

    /// Adds an assembly whose components and parent all belong to this system.
    ///
    /// # Return
    ///
    /// Returns `Some(AssemblyId)` if successful, otherwise `None` (a component or the
    /// parent refers to something outside this system).
    pub fn add_assembly(&mut self, assembly: Assembly) -> Option<AssemblyId> {
        for component in &assembly.components {
            match component.component {
                ComponentRef::Entity(id) => {
                    self.entities.get(id)?;
                }
                ComponentRef::Asym(id) => {
                    self.asym_units.get(id)?;
                }
            }
        }
        if let Some(parent) = assembly.parent {
            self.assemblies.get(parent)?;
        }
        let id = self.assemblies.insert(assembly);
        self.assembly_order.push(id);
        Some(id)
    }

    pub fn add_location(&mut self, location: impl Into<Location>) {
        self.locations.push(location.into());
    }

    /// Moves local file locations into whichever of `repositories` holds them.
    ///
    /// Each repository with a `root` is treated as a checkout of its archive. Local files
    /// under a root are rebound to that repository with a root-relative path. Locations
    /// already in a repository are not touched.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a repository root cannot be made absolute.
    pub fn update_locations_in_repositories(
        &mut self,
        repositories: &[Repository],
    ) -> io::Result<()> {
        for location in &mut self.locations {
            if let Location::File(file) = location {
                file.relocate(repositories)?;
            }
        }
        Ok(())
    }
}
