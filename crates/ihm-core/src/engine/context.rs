use super::config::DumpConfig;
use super::error::DumpError;
use crate::core::models::ids::{AssemblyId, AsymId, EntityId};
use crate::core::models::location::{FileLocation, Repository};
use crate::core::utils::numbering::IdTable;
use slotmap::SecondaryMap;

/// Output identity of an asym unit: its 1-based position and its chain label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsymLabel {
    pub ordinal: usize,
    pub id: String,
}

/// An assembly component with every reference resolved and its residue range filled in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalComponent {
    pub entity: EntityId,
    pub asym: Option<AsymId>,
    pub seq_id_range: (usize, usize),
}

/// A distinct assembly as it will be written.
#[derive(Debug, Clone)]
pub struct AssemblyRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent: Option<AssemblyId>,
    pub components: Vec<CanonicalComponent>,
}

/// The repository a file location is written against.
///
/// Files outside any repository share the `LocalFiles` pseudo-repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryRef<'a> {
    Remote(&'a Repository),
    LocalFiles,
}

impl<'a> RepositoryRef<'a> {
    pub fn of(file: &'a FileLocation) -> Self {
        file.repo.as_ref().map_or(Self::LocalFiles, Self::Remote)
    }
}

#[derive(Debug, Default)]
pub struct AssemblyTable {
    pub(crate) distinct: IdTable<Vec<CanonicalComponent>, AssemblyRecord>,
    pub(crate) by_source: SecondaryMap<AssemblyId, usize>,
    pub(crate) assigned: Vec<usize>, // ID of every assembly considered, in system order
}

#[derive(Debug, Default)]
pub struct ExternalReferences<'a> {
    pub(crate) locations: IdTable<&'a FileLocation>,
    pub(crate) repositories: IdTable<RepositoryRef<'a>>,
    pub(crate) file_paths: Vec<String>, // Rendered path of each distinct location, in ID order
}

/// Everything derived from one system while it is exported.
///
/// A fresh context is created for every system, so IDs always restart at 1 and nothing
/// computed for one data block can leak into the next. Dumpers fill it during finalize
/// and only read it while dumping.
#[derive(Debug)]
pub struct DumpContext<'a> {
    pub(crate) config: &'a DumpConfig,
    pub(crate) entity_ids: SecondaryMap<EntityId, usize>,
    pub(crate) asym_labels: SecondaryMap<AsymId, AsymLabel>,
    pub(crate) monomers: SecondaryMap<EntityId, Vec<&'static str>>,
    pub(crate) chem_comps: IdTable<&'static str>,
    pub(crate) assemblies: AssemblyTable,
    pub(crate) external: ExternalReferences<'a>,
}

impl<'a> DumpContext<'a> {
    pub fn new(config: &'a DumpConfig) -> Self {
        Self {
            config,
            entity_ids: SecondaryMap::new(),
            asym_labels: SecondaryMap::new(),
            monomers: SecondaryMap::new(),
            chem_comps: IdTable::new(),
            assemblies: AssemblyTable::default(),
            external: ExternalReferences::default(),
        }
    }

    pub fn config(&self) -> &DumpConfig {
        self.config
    }

    /// Output ID of an entity, assigned in system order starting at 1.
    pub fn entity_id(&self, entity: EntityId) -> Result<usize, DumpError> {
        self.entity_ids
            .get(entity)
            .copied()
            .ok_or(DumpError::DanglingReference { kind: "entity" })
    }

    pub fn asym_label(&self, asym: AsymId) -> Result<&AsymLabel, DumpError> {
        self.asym_labels
            .get(asym)
            .ok_or(DumpError::DanglingReference { kind: "asym unit" })
    }

    /// Output ID of a caller-declared assembly after deduplication.
    pub fn assembly_id(&self, assembly: AssemblyId) -> Result<usize, DumpError> {
        self.assemblies
            .by_source
            .get(assembly)
            .copied()
            .ok_or(DumpError::DanglingReference { kind: "assembly" })
    }

    /// IDs of all assemblies in system order; equal assemblies repeat the same ID.
    pub fn assigned_assembly_ids(&self) -> &[usize] {
        &self.assemblies.assigned
    }
}
