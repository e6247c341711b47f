//! `fillcheck.json` loading and per-file rule resolution.
//!
//! The file is `fillcheck.json` in the working directory, or the path given
//! with `--config`. Globs in `include`, `exclude` and `overrides[].files` are
//! matched against paths relative to the directory holding the file; later
//! overrides win.

use anyhow::{Context, Result, bail};
use fillcheck_rules::{Severity, builtin_rules};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "fillcheck.json";

/// Applied when the configuration has no `exclude` list.
pub const DEFAULT_EXCLUDE: &[&str] = &["**/node_modules/**"];

/// `fillcheck.json` as written on disk.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FillcheckConfig {
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub rules: IndexMap<String, RuleEntry>,
    #[serde(default)]
    pub overrides: Vec<OverrideConfig>,
}

/// A rule entry: `"warn"` or `["warn", { ...options }]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleEntry {
    Severity(Severity),
    WithOptions(Severity, Value),
}

impl RuleEntry {
    pub fn severity(&self) -> Severity {
        match self {
            RuleEntry::Severity(severity) | RuleEntry::WithOptions(severity, _) => *severity,
        }
    }

    pub fn options(&self) -> Option<&Value> {
        match self {
            RuleEntry::Severity(_) => None,
            RuleEntry::WithOptions(_, options) => Some(options),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideConfig {
    pub files: Vec<String>,
    #[serde(default)]
    pub rules: IndexMap<String, RuleEntry>,
}

/// Effective setting of one rule for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    pub severity: Severity,
    /// `Value::Null` when no options were configured.
    pub options: Value,
}

impl Default for RuleSetting {
    fn default() -> Self {
        RuleSetting {
            severity: Severity::Error,
            options: Value::Null,
        }
    }
}

/// Rule settings keyed by rule name, in registry order.
pub type RuleSettings = IndexMap<&'static str, RuleSetting>;

#[derive(Debug, Clone)]
struct ResolvedOverride {
    matcher: GlobSet,
    rules: IndexMap<&'static str, RuleEntry>,
}

/// A validated configuration with compiled globs.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory globs are relative to.
    pub root: PathBuf,
    /// The file the configuration was loaded from, if any.
    pub source: Option<PathBuf>,
    include: Option<GlobSet>,
    exclude: GlobSet,
    rules: RuleSettings,
    overrides: Vec<ResolvedOverride>,
}

pub fn parse_config(source: &str) -> Result<FillcheckConfig> {
    serde_json::from_str(source).context("invalid fillcheck configuration")
}

pub fn load_config(path: &Path) -> Result<FillcheckConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

impl ResolvedConfig {
    /// Every built-in rule at `error` with default options.
    pub fn defaults(root: &Path) -> Self {
        let rules = builtin_rules()
            .names()
            .map(|name| (name, RuleSetting::default()))
            .collect();
        ResolvedConfig {
            root: root.to_path_buf(),
            source: None,
            include: None,
            exclude: build_glob_set(DEFAULT_EXCLUDE).unwrap_or_else(|_| GlobSet::empty()),
            rules,
            overrides: Vec::new(),
        }
    }

    /// Validate `config` and compile its globs relative to `root`.
    pub fn resolve(config: FillcheckConfig, root: &Path) -> Result<Self> {
        let mut resolved = ResolvedConfig::defaults(root);

        if let Some(include) = &config.include {
            resolved.include = Some(build_glob_set(include).context("invalid `include` pattern")?);
        }
        if let Some(exclude) = &config.exclude {
            resolved.exclude = build_glob_set(exclude).context("invalid `exclude` pattern")?;
        }

        for (name, entry) in validate_rules(&config.rules)? {
            apply_entry(&mut resolved.rules, name, entry);
        }

        for (index, override_config) in config.overrides.into_iter().enumerate() {
            if override_config.files.is_empty() {
                bail!("overrides[{index}]: `files` must not be empty");
            }
            let matcher = build_glob_set(&override_config.files)
                .with_context(|| format!("overrides[{index}]: invalid `files` pattern"))?;
            let rules = validate_rules(&override_config.rules)
                .with_context(|| format!("overrides[{index}]"))?
                .into_iter()
                .collect();
            resolved.overrides.push(ResolvedOverride { matcher, rules });
        }

        Ok(resolved)
    }

    /// Load `explicit`, or `fillcheck.json` in `cwd` when present, or defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => cwd.join(path),
            None => {
                let candidate = cwd.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    debug!(cwd = %cwd.display(), "no config file, using defaults");
                    return Ok(ResolvedConfig::defaults(cwd));
                }
                candidate
            }
        };

        let config = load_config(&path)?;
        let root = path.parent().unwrap_or(cwd);
        let mut resolved = ResolvedConfig::resolve(config, root)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        debug!(config = %path.display(), rules = resolved.rules.len(), "loaded config");
        resolved.source = Some(path);
        Ok(resolved)
    }

    /// Whether a discovered file passes the `include`/`exclude` globs.
    pub fn is_included(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        if self.exclude.is_match(relative) {
            return false;
        }
        self.include
            .as_ref()
            .map_or(true, |include| include.is_match(relative))
    }

    /// Whether a directory should be skipped during discovery.
    pub fn is_excluded_dir(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        !relative.as_os_str().is_empty() && self.exclude.is_match(relative.join("_"))
    }

    /// Rule settings for `path`, with matching overrides applied in order.
    pub fn rules_for(&self, path: &Path) -> RuleSettings {
        let mut rules = self.rules.clone();
        let relative = self.relative(path);
        for override_config in &self.overrides {
            if !override_config.matcher.is_match(relative) {
                continue;
            }
            for (name, entry) in &override_config.rules {
                apply_entry(&mut rules, name, entry.clone());
            }
        }
        rules
    }

    /// The base rule settings, before overrides.
    pub fn rules(&self) -> &RuleSettings {
        &self.rules
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// A bare severity keeps the options already in effect.
fn apply_entry(rules: &mut RuleSettings, name: &'static str, entry: RuleEntry) {
    let setting = rules.entry(name).or_default();
    setting.severity = entry.severity();
    if let RuleEntry::WithOptions(_, options) = entry {
        setting.options = options;
    }
}

/// Check rule names against the registry and options against each rule.
fn validate_rules(rules: &IndexMap<String, RuleEntry>) -> Result<Vec<(&'static str, RuleEntry)>> {
    let registry = builtin_rules();
    let mut validated = Vec::with_capacity(rules.len());
    for (name, entry) in rules {
        let Some(rule) = registry.get(name) else {
            let known: Vec<&str> = registry.names().collect();
            bail!("unknown rule `{name}` (known rules: {})", known.join(", "));
        };
        if let Some(options) = entry.options() {
            rule.validate_options(options)
                .with_context(|| format!("invalid options for rule `{name}`"))?;
        }
        validated.push((rule.name(), entry.clone()));
    }
    Ok(validated)
}

fn build_glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob `{pattern}`"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
