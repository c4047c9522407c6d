use crate::config::RuleFileConfig;
use crate::rule::Rule;
use crate::ConfigError;
use modifier_core::ModifierPools;
use std::collections::BTreeMap;
use std::path::Path;

/// Registry of all rule files, keyed by file stem
#[derive(Debug, Default)]
pub struct RuleRegistry {
    sources: BTreeMap<String, Vec<Rule>>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all rule files from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_dir(dir)?;
        Ok(registry)
    }

    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        // Sorted for a stable load order
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            paths.push(entry.path());
        }
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    /// Load a single rule file
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;

        let source = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.add_source(&source, &content, path)
    }

    /// Parse rule file contents under a source name
    pub fn add_source(
        &mut self,
        source: &str,
        content: &str,
        path: &Path,
    ) -> Result<(), ConfigError> {
        let config: RuleFileConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;

        let rules = config
            .rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| Rule::from_config(source, index, rule))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::Validation {
                message: e.to_string(),
                path: path.to_path_buf(),
            })?;

        tracing::debug!("Loaded {} rules from '{}'", rules.len(), source);
        self.sources.insert(source.to_string(), rules);
        Ok(())
    }

    /// Rules loaded from a source
    pub fn get(&self, source: &str) -> Option<&[Rule]> {
        self.sources.get(source).map(|rules| rules.as_slice())
    }

    pub fn contains(&self, source: &str) -> bool {
        self.sources.contains_key(source)
    }

    /// List all source names
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(|s| s.as_str())
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.sources.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.sources.values().map(|rules| rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compile every rule into pools for an actor of `level`
    pub fn pools(&self, level: i32) -> ModifierPools {
        let mut pools = ModifierPools::new();
        for rule in self.rules() {
            rule.apply(level, &mut pools);
        }
        pools
    }
}
