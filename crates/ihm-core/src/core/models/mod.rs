//! # Core Models Module
//!
//! The data model of an integrative structure as the caller builds it. Nothing here knows
//! about mmCIF IDs; those are assigned per export by the engine.
//!
//! ## Key Components
//!
//! - [`system`] - The complete model, owning every other object
//! - [`entity`] - Distinct sequences, compared by value
//! - [`asym`] - Chain instances of entities
//! - [`assembly`] - Named groups of entities and chains
//! - [`location`] - Repositories, external files and database entries
//! - [`software`] - Software used in modeling
//! - [`ids`] - Stable handles for entities, asym units and assemblies
//!
//! ## Usage
//!
//! ```ignore
//! use ihm_mmcif::core::models::{asym::AsymUnit, entity::Entity, system::System};
//!
//! let mut system = System::new("my_model");
//! let entity = system.add_entity(Entity::new("ACDEFG").with_description("Nup84"));
//! let chain = system.add_asym_unit(AsymUnit::new(entity)).unwrap();
//! ```

pub mod assembly;
pub mod asym;
pub mod entity;
pub mod ids;
pub mod location;
pub mod software;
pub mod system;
