use crate::assembler::MapAssembler;
use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::request::MapRequest;
use crate::strategy::TagSelector;
use crate::tokens::TokenCounter;
use context_graph::FileTags;
use context_indexer::{PathResolver, TrackedFiles};
use context_tags::TagExtractor;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Everything one map run shares: the repository, path conversion, compiled
/// queries and configuration. Built once per invocation and borrowed by the
/// selectors.
pub struct MapContext {
    tracked: TrackedFiles,
    paths: PathResolver,
    extractor: TagExtractor,
    config: MapConfig,
}

impl MapContext {
    /// Open the repository at `root`, which must be absolute
    pub fn open(root: impl AsRef<Path>, config: MapConfig) -> Result<Self> {
        config.validate().map_err(MapError::InvalidConfig)?;

        let tracked = TrackedFiles::open(root.as_ref())?;
        let extractor = match &config.queries_dir {
            Some(dir) => TagExtractor::with_query_dir(dir)?,
            None => TagExtractor::new(),
        };
        log::debug!(
            "Tags queries loaded for {} languages",
            extractor.queries().len()
        );

        Ok(Self {
            paths: PathResolver::new(tracked.root()),
            tracked,
            extractor,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        self.tracked.root()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Tracked files selected by the request's directory and depth
    pub fn enumerate(&self, request: &MapRequest) -> Result<Vec<PathBuf>> {
        Ok(self.tracked.list(request.dir.as_deref(), request.depth)?)
    }

    /// Extract tags from every file in parallel, keeping input order
    pub fn extract_all(&self, files: &[PathBuf]) -> Result<Vec<FileTags>> {
        let extractor = &self.extractor;
        let paths = &self.paths;
        let extracted = files
            .par_iter()
            .map(|fname| -> Result<FileTags> {
                let rel_fname = paths.relative(fname)?;
                let tags = extractor.extract(fname, &rel_fname);
                Ok(FileTags::new(rel_fname, fname.clone(), tags))
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Extracted {} tags from {} files",
            extracted.iter().map(|f| f.tags.len()).sum::<usize>(),
            extracted.len()
        );
        Ok(extracted)
    }

    /// Enumerate and extract in one step
    pub fn collect_tags(&self, request: &MapRequest) -> Result<Vec<FileTags>> {
        let files = self.enumerate(request)?;
        self.extract_all(&files)
    }

    /// Build the map text for `selector`
    pub fn map(&self, selector: &dyn TagSelector, request: &MapRequest) -> Result<String> {
        let tags = selector.select_tags(self, request)?;
        let assembler = MapAssembler::new(&self.config.context, self.config.max_line_chars);
        let map = assembler.assemble(&tags);
        log::info!(
            "Built {} map: {} tags, {} bytes",
            selector.name(),
            tags.len(),
            map.len()
        );
        Ok(map)
    }

    /// Build the map and append its token count for the configured model
    pub fn map_with_token_count(
        &self,
        selector: &dyn TagSelector,
        request: &MapRequest,
        counter: &dyn TokenCounter,
    ) -> Result<String> {
        let map = self.map(selector, request)?;
        let count = counter.count_tokens(&self.config.model, &map)?;
        Ok(format!("{map}\n\nToken count: {count}"))
    }
}
