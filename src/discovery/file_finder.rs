use crate::config::Config;
use ignore::WalkBuilder;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

pub const MANIFEST_FILE_NAME: &str = "AndroidManifest.xml";

/// Locates AndroidManifest.xml files in a project
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Resolve the manifest to analyze.
    ///
    /// A file path is used as is. For a directory the shallowest manifest
    /// below it is picked, ties broken by path order.
    pub fn locate(&self, path: &Path) -> Result<PathBuf> {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        if !path.exists() {
            return Err(miette::miette!("Path does not exist: {}", path.display()));
        }

        let mut manifests = self.find_manifests(path);
        if manifests.is_empty() {
            return Err(miette::miette!(
                "No {} found under {}",
                MANIFEST_FILE_NAME,
                path.display()
            ));
        }

        manifests.sort_by(|a, b| {
            a.components()
                .count()
                .cmp(&b.components().count())
                .then_with(|| a.cmp(b))
        });

        let chosen = manifests.remove(0);
        if !manifests.is_empty() {
            info!(
                "Found {} manifests, using {}",
                manifests.len() + 1,
                chosen.display()
            );
            for other in &manifests {
                debug!("Ignoring manifest {}", other.display());
            }
        }
        Ok(chosen)
    }

    /// All manifests below `root` that are not excluded
    pub fn find_manifests(&self, root: &Path) -> Vec<PathBuf> {
        debug!("Scanning for manifests in: {}", root.display());

        let walker = WalkBuilder::new(root)
            .hidden(true)           // Skip hidden files
            .git_ignore(true)       // Respect .gitignore
            .git_global(true)       // Respect global gitignore
            .git_exclude(true)      // Respect .git/info/exclude
            .ignore(true)           // Respect .ignore files
            .parents(true)          // Check parent directories for ignore files
            .follow_links(false)    // Don't follow symlinks
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter(|entry| entry.file_name() == MANIFEST_FILE_NAME)
            .filter_map(|entry| {
                let path = entry.path();
                if self.config.should_exclude(path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }
                trace!("Found manifest: {}", path.display());
                Some(path.to_path_buf())
            })
            .collect()
    }
}
