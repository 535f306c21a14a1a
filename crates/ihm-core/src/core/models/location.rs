use crate::core::utils::paths;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};

const ZENODO_DOI_PREFIX: &str = "10.5281/zenodo.";

/// What an external file contains, as reported in `_ihm_external_files.content_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileContent {
    Input,
    Output,
    Workflow,
    Visualization,
    Unspecified,
}

impl FileContent {
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            FileContent::Input => Some("Input data or restraints"),
            FileContent::Output => Some("Modeling or post-processing output"),
            FileContent::Workflow => Some("Modeling workflow or script"),
            FileContent::Visualization => Some("Visualization script"),
            FileContent::Unspecified => None,
        }
    }
}

/// A DOI-addressed archive or file holding external files.
///
/// Repositories are compared by the fields written on output (`doi`, `url` and
/// `top_directory`), so separately constructed but identical repositories are the same
/// repository. The local `root` does not participate.
#[derive(Debug, Clone)]
pub struct Repository {
    pub doi: String,
    pub url: Option<String>,           // Where the archive or file can be downloaded
    pub top_directory: Option<String>, // Directory inside the archive that holds the files
    pub root: Option<PathBuf>,         // Local checkout corresponding to the archive
}

impl Repository {
    pub fn new(doi: &str) -> Self {
        Self {
            doi: doi.to_string(),
            url: None,
            top_directory: None,
            root: None,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_top_directory(mut self, top_directory: &str) -> Self {
        self.top_directory = Some(top_directory.to_string());
        self
    }

    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    pub fn reference_provider(&self) -> Option<&'static str> {
        self.doi.starts_with(ZENODO_DOI_PREFIX).then_some("Zenodo")
    }

    pub fn refers_to(&self) -> &'static str {
        match &self.url {
            None => "Other",
            Some(url) if url.ends_with(".zip") => "Archive",
            Some(_) => "File",
        }
    }

    /// Path of a repository file as seen from the top of the downloaded archive.
    pub fn full_path(&self, path: &Path) -> PathBuf {
        match &self.top_directory {
            Some(top) => Path::new(top).join(path),
            None => path.to_path_buf(),
        }
    }
}

impl PartialEq for Repository {
    fn eq(&self, other: &Self) -> bool {
        self.doi == other.doi && self.url == other.url && self.top_directory == other.top_directory
    }
}

impl Eq for Repository {}

impl Hash for Repository {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.doi.hash(state);
        self.url.hash(state);
        self.top_directory.hash(state);
    }
}

/// An external file, either on local disk or inside a [`Repository`].
///
/// Equality covers the content kind, path and repository; `details` and `file_size` are
/// descriptive only.
#[derive(Debug, Clone)]
pub struct FileLocation {
    pub content: FileContent,
    pub path: PathBuf,
    pub repo: Option<Repository>,
    pub file_size: Option<u64>,
    pub details: Option<String>,
}

impl FileLocation {
    /// Points at a file on local disk, recording its absolute path and size.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file does not exist or cannot be inspected.
    pub fn local(content: FileContent, path: impl AsRef<Path>) -> io::Result<Self> {
        let path = paths::normalize(&std::path::absolute(path)?);
        let file_size = fs::metadata(&path)?.len();
        Ok(Self {
            content,
            path,
            repo: None,
            file_size: Some(file_size),
            details: None,
        })
    }

    /// Points at a file inside `repo`; `path` is relative to the repository top.
    pub fn in_repository(content: FileContent, repo: Repository, path: impl AsRef<Path>) -> Self {
        Self {
            content,
            path: path.as_ref().to_path_buf(),
            repo: Some(repo),
            file_size: None,
            details: None,
        }
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }

    /// Rebinds a local file to the repository whose root contains it.
    ///
    /// Of several containing roots, the one leaving the shortest relative path wins.
    /// Files that already belong to a repository are left alone.
    pub(crate) fn relocate(&mut self, repositories: &[Repository]) -> io::Result<()> {
        if self.repo.is_some() {
            return Ok(());
        }
        let mut best: Option<(&Repository, PathBuf)> = None;
        for repo in repositories {
            let Some(root) = &repo.root else { continue };
            let root = paths::normalize(&std::path::absolute(root)?);
            let Ok(relative) = self.path.strip_prefix(&root) else {
                continue;
            };
            let shorter = best.as_ref().is_none_or(|(_, current)| {
                relative.components().count() < current.components().count()
            });
            if shorter {
                best = Some((repo, relative.to_path_buf()));
            }
        }
        if let Some((repo, relative)) = best {
            self.repo = Some(repo.clone());
            self.path = relative;
            self.file_size = None;
        }
        Ok(())
    }
}

impl PartialEq for FileLocation {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content && self.path == other.path && self.repo == other.repo
    }
}

impl Eq for FileLocation {}

impl Hash for FileLocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content.hash(state);
        self.path.hash(state);
        self.repo.hash(state);
    }
}

/// An entry in a structured external database such as PDB or EMDB.
#[derive(Debug, Clone)]
pub struct DatabaseLocation {
    pub db_name: String,
    pub access_code: String,
    pub version: Option<String>,
    pub details: Option<String>,
}

impl DatabaseLocation {
    pub fn new(db_name: &str, access_code: &str) -> Self {
        Self {
            db_name: db_name.to_string(),
            access_code: access_code.to_string(),
            version: None,
            details: None,
        }
    }

    pub fn pdb(access_code: &str) -> Self {
        Self::new("PDB", access_code)
    }

    pub fn emdb(access_code: &str) -> Self {
        Self::new("EMDB", access_code)
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

impl PartialEq for DatabaseLocation {
    fn eq(&self, other: &Self) -> bool {
        self.db_name == other.db_name
            && self.access_code == other.access_code
            && self.version == other.version
    }
}

impl Eq for DatabaseLocation {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(FileLocation),
    Database(DatabaseLocation),
}

impl From<FileLocation> for Location {
    fn from(location: FileLocation) -> Self {
        Location::File(location)
    }
}

impl From<DatabaseLocation> for Location {
    fn from(location: DatabaseLocation) -> Self {
        Location::Database(location)
    }
}
