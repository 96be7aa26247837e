//! Registry of template configs keyed by template name.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, warn};

use super::config::TemplateConfig;
use crate::error::{PlannerError, Result};

/// Name of the template used when no other template matches.
pub const FALLBACK_TEMPLATE: &str = "base";

/// Template configs compiled into the binary, as `(name, yaml)` pairs.
const BUILTIN_TEMPLATES: [(&str, &str); 5] = [
    ("api", include_str!("../../templates/api.yaml")),
    ("base", include_str!("../../templates/base.yaml")),
    ("cli", include_str!("../../templates/cli.yaml")),
    ("library", include_str!("../../templates/library.yaml")),
    ("web-app", include_str!("../../templates/web-app.yaml")),
];

/// Template configs available for selection, iterated in name order.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, TemplateConfig>,
}

impl TemplateRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in templates.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for (name, yaml) in BUILTIN_TEMPLATES {
            registry.insert(name, TemplateConfig::from_yaml(name, yaml)?);
        }
        Ok(registry)
    }

    /// Add or replace a template, returning the config it replaced.
    pub fn insert(&mut self, name: impl Into<String>, config: TemplateConfig) -> Option<TemplateConfig> {
        self.templates.insert(name.into(), config)
    }

    /// Load every template in `dir`.
    ///
    /// Both `<name>.yaml` files and `<name>/config.yaml` directories are
    /// recognized; entries starting with `_` are skipped. Templates with the
    /// name of an existing entry replace it. Returns how many were loaded.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize> {
        let fs_error = |source| PlannerError::FileSystem {
            path: dir.to_path_buf(),
            source,
        };

        let mut loaded = 0;
        for entry in std::fs::read_dir(dir).map_err(fs_error)? {
            let path = entry.map_err(fs_error)?.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.starts_with('_') {
                continue;
            }

            let config_path = if path.is_dir() {
                path.join("config.yaml")
            } else if matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml" | "yml")
            ) {
                path.clone()
            } else {
                continue;
            };
            if !config_path.is_file() {
                continue;
            }

            let name = if path.is_dir() {
                path.file_name().and_then(|s| s.to_str()).unwrap_or(stem)
            } else {
                stem
            }
            .to_string();

            let content =
                std::fs::read_to_string(&config_path).map_err(|source| PlannerError::FileSystem {
                    path: config_path.clone(),
                    source,
                })?;
            let config = TemplateConfig::from_yaml(&name, &content)?;
            if self.insert(name.clone(), config).is_some() {
                debug!("Template '{}' overridden by {}", name, config_path.display());
            }
            loaded += 1;
        }

        debug!("Loaded {} templates from {}", loaded, dir.display());
        Ok(loaded)
    }

    /// Template names in iteration order.
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Config exactly as declared, without inheritance applied.
    pub fn get(&self, name: &str) -> Result<&TemplateConfig> {
        self.templates
            .get(name)
            .ok_or_else(|| PlannerError::not_found("Template", name))
    }

    /// Config with its `extends` chain merged in, parent first.
    pub fn resolve(&self, name: &str) -> Result<TemplateConfig> {
        let mut chain = vec![name.to_string()];
        let mut current = self.get(name)?;

        while let Some(parent) = current.extends.as_deref() {
            if chain.iter().any(|seen| seen == parent) {
                chain.push(parent.to_string());
                return Err(PlannerError::configuration(format!(
                    "Template inheritance cycle: {}",
                    chain.join(" -> ")
                )));
            }
            chain.push(parent.to_string());
            current = self.get(parent)?;
        }

        // Merge from the root of the chain down to the requested template.
        let mut resolved: Option<TemplateConfig> = None;
        for link in chain.iter().rev() {
            let config = self.get(link)?.clone();
            resolved = Some(match resolved {
                Some(parent) => config.inherit_from(&parent),
                None => config,
            });
        }

        resolved.ok_or_else(|| PlannerError::not_found("Template", name))
    }

    /// Resolve every template once, failing on the first broken `extends`
    /// chain. Run after loading so selection never meets one.
    pub fn check_inheritance(&self) -> Result<()> {
        for name in self.templates.keys() {
            if let Err(err) = self.resolve(name) {
                return Err(match err {
                    PlannerError::Configuration { .. } => err,
                    other => PlannerError::configuration(format!(
                        "Template '{name}' cannot be resolved: {other}"
                    )),
                });
            }
        }
        Ok(())
    }

    /// Resolved config of the first template, in name order, whose
    /// project-type patterns match. Falls back to [`FALLBACK_TEMPLATE`].
    pub fn select(&self, project_type: &str) -> Result<TemplateConfig> {
        for (name, config) in &self.templates {
            let resolved = self.resolve(name)?;
            if resolved.matches(project_type) {
                debug!("Selected template '{}' for project type '{}'", config.name, project_type);
                return Ok(resolved);
            }
        }

        if self.templates.contains_key(FALLBACK_TEMPLATE) {
            debug!(
                "No template matches project type '{}', using '{}'",
                project_type, FALLBACK_TEMPLATE
            );
            return self.resolve(FALLBACK_TEMPLATE);
        }

        warn!("Fallback template '{}' is not registered", FALLBACK_TEMPLATE);
        Err(PlannerError::configuration(format!(
            "No matching template found for project type '{project_type}' and no '{FALLBACK_TEMPLATE}' template available"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn registry() -> TemplateRegistry {
        TemplateRegistry::builtin().unwrap()
    }

    #[test]
    fn test_builtin_names_are_sorted() {
        assert_eq!(
            registry().names(),
            vec!["api", "base", "cli", "library", "web-app"]
        );
    }

    #[test]
    fn test_select_by_project_type() {
        let registry = registry();
        for (input, expected) in [
            ("CLI Tool", "cli"),
            ("cli tool", "cli"),
            ("  CLI TOOL  ", "cli"),
            ("cli", "cli"),
            ("Web App", "web-app"),
            ("API", "api"),
            ("rest-api", "api"),
            ("SDK", "library"),
            ("Unknown Project Type", "base"),
        ] {
            assert_eq!(registry.select(input).unwrap().name, expected, "{input}");
        }
    }

    #[test]
    fn test_select_without_fallback_fails() {
        let mut registry = TemplateRegistry::new();
        registry.insert("cli", registry_config("cli", "[CLI]"));

        let err = registry.select("Game").unwrap_err();
        assert!(err.to_string().contains("No matching template found"));
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let err = registry().get("mobile").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Template 'mobile' not found");
    }

    #[test]
    fn test_resolve_inherits_base_rules() {
        let registry = registry();
        let base = registry.get("base").unwrap();
        let api = registry.resolve("api").unwrap();

        assert_eq!(&api.rules[..base.rules.len()], &base.rules[..]);
        assert!(api.rules.len() > base.rules.len());
        assert_eq!(api.default_phases[1], "Data Models");
    }

    #[test]
    fn test_resolve_detects_cycles() {
        let mut registry = TemplateRegistry::new();
        let mut a = registry_config("a", "[]");
        a.extends = Some("b".to_string());
        let mut b = registry_config("b", "[]");
        b.extends = Some("a".to_string());
        registry.insert("a", a);
        registry.insert("b", b);

        let err = registry.resolve("a").unwrap_err();
        assert!(err.to_string().contains("a -> b -> a"));
    }

    #[test]
    fn test_resolve_missing_parent_is_not_found() {
        let mut registry = TemplateRegistry::new();
        let mut orphan = registry_config("orphan", "[]");
        orphan.extends = Some("ghost".to_string());
        registry.insert("orphan", orphan);

        assert!(registry.resolve("orphan").unwrap_err().is_not_found());
    }

    #[test]
    fn test_check_inheritance_names_the_broken_template() {
        let mut registry = registry();
        assert!(registry.check_inheritance().is_ok());

        let mut orphan = registry_config("orphan", "[]");
        orphan.extends = Some("ghost".to_string());
        registry.insert("orphan", orphan);

        let err = registry.check_inheritance().unwrap_err();
        assert!(matches!(err, PlannerError::Configuration { .. }));
        assert!(err.to_string().contains("'orphan' cannot be resolved"));
        assert!(err.to_string().contains("'ghost' not found"));
    }

    #[test]
    fn test_load_directory_overrides_and_adds() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("cli.yaml"),
            "name: cli\ndescription: Rust CLI\nversion: '2.0'\nextends: base\nproject_types: [CLI Tool]\ndefault_tech_stack:\n  language: Rust\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("game")).unwrap();
        fs::write(
            dir.path().join("game").join("config.yaml"),
            "name: game\ndescription: Game\nversion: '1.0'\nproject_types: [Game]\n",
        )
        .unwrap();
        fs::write(dir.path().join("_draft.yaml"), "not: valid: yaml").unwrap();
        fs::write(dir.path().join("README.md"), "ignored").unwrap();

        let mut registry = registry();
        let loaded = registry.load_directory(dir.path()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.select("Game").unwrap().name, "game");

        let cli = registry.select("CLI Tool").unwrap();
        assert_eq!(cli.description, "Rust CLI");
        assert_eq!(cli.tech_default("language"), Some("Rust"));
        assert_eq!(cli.default_phases[0], "Foundation");
    }

    #[test]
    fn test_load_directory_missing_dir_is_filesystem_error() {
        let err = registry()
            .load_directory(Path::new("/nonexistent/templates"))
            .unwrap_err();
        assert!(matches!(err, PlannerError::FileSystem { .. }));
    }

    fn registry_config(name: &str, project_types: &str) -> TemplateConfig {
        TemplateConfig::from_yaml(
            name,
            &format!("name: {name}\ndescription: d\nversion: '1'\nproject_types: {project_types}\n"),
        )
        .unwrap()
    }
}
