use crate::error::{IndexerError, Result};
use crate::paths::PathResolver;
use git2::{ErrorCode, ObjectType, Repository, TreeWalkMode, TreeWalkResult};
use std::path::{Path, PathBuf};

/// Lists the files tracked in a repository's HEAD commit
pub struct TrackedFiles {
    root: PathBuf,
    repo: Repository,
}

impl TrackedFiles {
    /// Open the repository whose working tree is exactly `root`
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_absolute() {
            return Err(IndexerError::RootNotAbsolute(root.to_path_buf()));
        }
        let repo = Repository::open(root).map_err(|source| IndexerError::RepositoryNotFound {
            root: root.to_path_buf(),
            source,
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            repo,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Tracked blob paths relative to the root, sorted.
    ///
    /// `dir_prefix` keeps only paths under that directory (`""` and `"."`
    /// mean the whole tree). `max_depth` keeps only paths with at most that
    /// many `/`-separated segments.
    pub fn list_relative(
        &self,
        dir_prefix: Option<&str>,
        max_depth: Option<usize>,
    ) -> Result<Vec<String>> {
        let tree = match self.repo.head() {
            Ok(head) => head.peel_to_tree()?,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                log::warn!("Repository at {} has no commits", self.root.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let prefix = dir_prefix.map(normalize_prefix).filter(|p| !p.is_empty());

        let mut files = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() != Some(ObjectType::Blob) {
                return TreeWalkResult::Ok;
            }
            match entry.name() {
                Some(name) => files.push(format!("{dir}{name}")),
                None => log::debug!("Skipping non-UTF-8 path under {dir}"),
            }
            TreeWalkResult::Ok
        })?;

        files.retain(|rel| {
            let in_dir = prefix
                .as_deref()
                .map_or(true, |p| rel.starts_with(&format!("{p}/")));
            let shallow = max_depth.map_or(true, |depth| rel.split('/').count() <= depth);
            in_dir && shallow
        });
        files.sort();

        log::info!("Found {} tracked files", files.len());
        Ok(files)
    }

    /// Tracked blob paths as absolute paths, sorted by relative path
    pub fn list(
        &self,
        dir_prefix: Option<&str>,
        max_depth: Option<usize>,
    ) -> Result<Vec<PathBuf>> {
        let paths = PathResolver::new(&self.root);
        Ok(self
            .list_relative(dir_prefix, max_depth)?
            .iter()
            .map(|rel| paths.absolute(rel))
            .collect())
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_start_matches("./").trim_end_matches('/');
    if trimmed == "." {
        String::new()
    } else {
        trimmed.to_string()
    }
}
