use crate::dictionary;
use crate::error::{CovcheckError, Result};
use crate::scoring::ScoringPolicy;
use crate::types::checklist::{Checklist, ChecklistKind};
use crate::types::config::{CovcheckConfig, PolicyName};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "covcheck.toml";

/// Loads the optional config. An explicit path must exist; the default file
/// is looked up under `root` and its absence is not an error.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Option<CovcheckConfig>> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(CovcheckError::ConfigNotFound(path.display().to_string()));
            }
            path.to_path_buf()
        }
        None => {
            let default = root.join(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(None);
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)?;
    let cfg: CovcheckConfig = toml::from_str(&content)
        .map_err(|error| CovcheckError::ConfigParse(format!("{}: {}", path.display(), error)))?;
    cfg.validate()?;
    Ok(Some(cfg))
}

/// Resolves the active checklist: custom config items win, then the CLI
/// kind, then the config's named kind, then the default checklist.
pub fn resolve_checklist(
    cfg: Option<&CovcheckConfig>,
    cli_kind: Option<ChecklistKind>,
) -> Result<Checklist> {
    if let Some(cfg) = cfg {
        if !cfg.items.is_empty() {
            let name = cfg
                .session
                .as_ref()
                .and_then(|session| session.checklist.clone())
                .unwrap_or_else(|| "custom".to_string());
            return Ok(Checklist {
                name,
                items: cfg.items.clone(),
                topic_map: cfg.topics.clone().unwrap_or_default(),
            });
        }
    }

    let kind = match cli_kind {
        Some(kind) => kind,
        None => match cfg {
            Some(cfg) => cfg.checklist_kind()?.unwrap_or(ChecklistKind::Default),
            None => ChecklistKind::Default,
        },
    };
    Ok(dictionary::builtin(kind))
}

/// CLI flag wins, then config, then the diminishing-returns default.
pub fn resolve_policy(cfg: Option<&CovcheckConfig>, cli_policy: Option<PolicyName>) -> ScoringPolicy {
    cli_policy
        .or_else(|| cfg.and_then(CovcheckConfig::policy))
        .map(ScoringPolicy::from)
        .unwrap_or(ScoringPolicy::DiminishingReturns)
}
