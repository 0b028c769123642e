use anyhow::{Context, Result, anyhow};
use formcoerce::{CONFIG_FILE_NAME, FormRegistry, FormsConfig};
use std::path::{Path, PathBuf};

/// Loaded form configuration for a CLI invocation
pub struct ConfigContext {
    /// Path the configuration was read from
    pub config_path: PathBuf,
    /// Parsed form definitions
    pub config: FormsConfig,
    /// Forms built from the definitions
    pub registry: FormRegistry,
}

impl ConfigContext {
    /// Load from an explicit path, or search the current directory and its ancestors
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let current_dir = std::env::current_dir().context("Failed to get current directory")?;
                Self::find_config_from(&current_dir).ok_or_else(|| {
                    anyhow!(
                        "No {CONFIG_FILE_NAME} found in {} or its parents (use --config or FORMCOERCE_CONFIG)",
                        current_dir.display()
                    )
                })?
            }
        };
        Self::from_path(path)
    }

    /// Read and build the configuration at `path`
    pub fn from_path(path: PathBuf) -> Result<Self> {
        let config = FormsConfig::load(&path)
            .with_context(|| format!("Failed to load form configuration from {}", path.display()))?;
        let registry = FormRegistry::from_config(&config)
            .with_context(|| format!("Invalid form configuration in {}", path.display()))?;
        Ok(Self {
            config_path: path,
            config,
            registry,
        })
    }

    /// Find the nearest config file starting at `start`
    pub fn find_config_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[[forms]]
name = "about"

[[forms.fields]]
name = "headline"
kind = "string"
"#;

    #[test]
    fn finds_config_in_ancestor() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();
        let nested = temp.path().join("src").join("routes");
        std::fs::create_dir_all(&nested).unwrap();

        let found = ConfigContext::find_config_from(&nested).unwrap();
        assert_eq!(found, temp.path().join(CONFIG_FILE_NAME));

        let ctx = ConfigContext::from_path(found).unwrap();
        assert_eq!(ctx.config.forms.len(), 1);
        assert!(ctx.registry.get("about").is_some());
    }

    #[test]
    fn explicit_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        let err = ConfigContext::load(Some(missing.as_path())).err().unwrap();
        assert!(err.to_string().contains("Failed to load form configuration"));
    }

    #[test]
    fn invalid_definitions_are_reported_with_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[[forms]]\nname = \"a\"\n[[forms]]\nname = \"a\"\n").unwrap();
        let err = ConfigContext::from_path(path).err().unwrap();
        assert!(err.to_string().starts_with("Invalid form configuration"));
    }
}
