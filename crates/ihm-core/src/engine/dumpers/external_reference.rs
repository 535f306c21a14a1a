use super::Dumper;
use crate::core::io::cif::{CifValue, CifWriter};
use crate::core::models::location::Location;
use crate::core::models::system::System;
use crate::core::utils::paths;
use crate::engine::context::{DumpContext, RepositoryRef};
use crate::engine::error::DumpError;
use std::path::PathBuf;
use tracing::debug;

const LOCAL_FILES_REFERENCE: &str = "Supplementary Files";

/// Writes the repositories holding external files and the files themselves.
///
/// Database locations are skipped. Locations and repositories are both deduplicated by
/// value, and every file path is resolved during finalize so that an unresolvable local
/// path aborts the export before anything is written. Relative local paths are taken
/// against the process working directory before being made relative to the local root.
pub struct ExternalReferenceDumper;

impl ExternalReferenceDumper {
    fn local_root(ctx: &DumpContext<'_>) -> Result<PathBuf, DumpError> {
        let root = match &ctx.config().local_files_root {
            Some(root) => std::path::absolute(root)?,
            None => std::env::current_dir()?,
        };
        Ok(paths::normalize(&root))
    }
}

impl Dumper for ExternalReferenceDumper {
    fn finalize<'a>(
        &self,
        system: &'a System,
        ctx: &mut DumpContext<'a>,
    ) -> Result<(), DumpError> {
        for location in &system.locations {
            let Location::File(file) = location else {
                continue;
            };
            ctx.external.locations.assign(file);
            ctx.external.repositories.assign(RepositoryRef::of(file));
        }
        if ctx.external.locations.is_empty() {
            return Ok(());
        }

        let local_root = Self::local_root(ctx)?;
        let mut file_paths = Vec::with_capacity(ctx.external.locations.len());
        for (_, &file) in ctx.external.locations.iter() {
            let path = match &file.repo {
                Some(repo) => repo.full_path(&file.path),
                None => {
                    let absolute = paths::normalize(&std::path::absolute(&file.path)?);
                    paths::relative_to(&absolute, &local_root).ok_or_else(|| {
                        DumpError::PathResolution {
                            path: file.path.clone(),
                            root: local_root.clone(),
                        }
                    })?
                }
            };
            file_paths.push(paths::to_posix(&path));
        }
        ctx.external.file_paths = file_paths;
        debug!(
            files = ctx.external.locations.len(),
            repositories = ctx.external.repositories.len(),
            "Collected external file references."
        );
        Ok(())
    }

    fn dump(
        &self,
        _system: &System,
        ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        writer.write_loop(
            "_ihm_external_reference_info",
            &[
                "reference_id",
                "reference_provider",
                "reference_type",
                "reference",
                "refers_to",
                "associated_url",
            ],
            |lp| {
                for (id, repository) in ctx.external.repositories.iter() {
                    match repository {
                        RepositoryRef::Remote(repo) => lp.row(&[
                            ("reference_id", id.into()),
                            ("reference_provider", repo.reference_provider().into()),
                            ("reference_type", "DOI".into()),
                            ("reference", repo.doi.as_str().into()),
                            ("refers_to", repo.refers_to().into()),
                            ("associated_url", repo.url.as_deref().into()),
                        ])?,
                        RepositoryRef::LocalFiles => lp.row(&[
                            ("reference_id", id.into()),
                            ("reference_provider", CifValue::Omitted),
                            ("reference_type", LOCAL_FILES_REFERENCE.into()),
                            ("reference", CifValue::Omitted),
                            ("refers_to", "Other".into()),
                            ("associated_url", CifValue::Omitted),
                        ])?,
                    }
                }
                Ok::<_, DumpError>(())
            },
        )?;

        writer.write_loop(
            "_ihm_external_files",
            &[
                "id",
                "reference_id",
                "file_path",
                "content_type",
                "file_size_bytes",
                "details",
            ],
            |lp| {
                let files = ctx.external.locations.iter().zip(&ctx.external.file_paths);
                for ((id, &file), path) in files {
                    let reference_id = ctx
                        .external
                        .repositories
                        .get(&RepositoryRef::of(file))
                        .ok_or(DumpError::DanglingReference { kind: "repository" })?;
                    lp.row(&[
                        ("id", id.into()),
                        ("reference_id", reference_id.into()),
                        ("file_path", path.as_str().into()),
                        ("content_type", file.content.content_type().into()),
                        ("file_size_bytes", file.file_size.into()),
                        ("details", file.details.as_deref().into()),
                    ])?;
                }
                Ok::<_, DumpError>(())
            },
        )?;
        Ok(())
    }
}
