use crate::tool::{Tool, ToolId};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Dataset {
    #[serde(default)]
    pub tools: Vec<Tool>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Loads a `[[tools]]` TOML dataset. Records with unrecognized categories are
/// kept (they surface in `unplaced`) but will never be positioned.
pub fn load_dataset(path: &Path) -> Result<Vec<Tool>, DatasetError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path.to_path_buf()))
        .build()?;

    let dataset: Dataset = s.try_deserialize()?;
    warn_duplicates(&dataset.tools);
    Ok(dataset.tools)
}

/// Same as `load_dataset` for an in-memory TOML document (built-in sample
/// data, tests).
pub fn load_dataset_str(toml: &str) -> Result<Vec<Tool>, DatasetError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    let dataset: Dataset = s.try_deserialize()?;
    warn_duplicates(&dataset.tools);
    Ok(dataset.tools)
}

/// Tools that will be silently skipped by placement.
pub fn unplaced(tools: &[Tool]) -> impl Iterator<Item = &Tool> {
    tools.iter().filter(|t| t.category.is_none())
}

/// Ids appearing more than once, in first-seen order. Ids are a caller
/// contract; duplicates are reported, not rejected.
pub fn duplicate_ids(tools: &[Tool]) -> Vec<ToolId> {
    let mut seen = HashSet::new();
    let mut dups = Vec::new();
    for t in tools {
        if !seen.insert(&t.id) && !dups.contains(&t.id) {
            dups.push(t.id.clone());
        }
    }
    dups
}

fn warn_duplicates(tools: &[Tool]) {
    for id in duplicate_ids(tools) {
        log::warn!("Duplicate tool id '{}' in dataset", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::Category;

    const SAMPLE: &str = r#"
[[tools]]
id = "ripgrep"
title = "ripgrep"
description = "Fast recursive grep"
url = "https://github.com/BurntSushi/ripgrep"
category = "adopt"
team_position = "everywhere"

[[tools]]
id = "mystery"
title = "Mystery"
category = "someday-maybe"

[[tools]]
id = "bacon"
title = "bacon"
category = "Trial"

[tools.reviewer]
name = "Sam"
"#;

    #[test]
    fn test_load_dataset_str() {
        let tools = load_dataset_str(SAMPLE).unwrap();
        assert_eq!(tools.len(), 3);

        let ripgrep = tools.iter().find(|t| t.id.as_ref() == "ripgrep").unwrap();
        assert_eq!(ripgrep.category, Some(Category::Adopt));
        assert_eq!(ripgrep.team_position.as_deref(), Some("everywhere"));

        let bacon = tools.iter().find(|t| t.id.as_ref() == "bacon").unwrap();
        assert_eq!(bacon.category, Some(Category::Trial));
        assert_eq!(bacon.reviewer.as_ref().unwrap().name, "Sam");
    }

    #[test]
    fn test_unrecognized_category_survives_load_but_is_unplaced() {
        let tools = load_dataset_str(SAMPLE).unwrap();
        let skipped: Vec<&str> = unplaced(&tools).map(|t| t.id.as_str()).collect();
        assert_eq!(skipped, vec!["mystery"]);
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let toml = r#"
[[tools]]
id = "x"
title = "X"
[[tools]]
id = "x"
title = "X again"
[[tools]]
id = "x"
title = "X a third time"
"#;
        let tools = load_dataset_str(toml).unwrap();
        assert_eq!(duplicate_ids(&tools), vec![ToolId::new("x")]);
    }

    #[test]
    fn test_empty_document() {
        assert!(load_dataset_str("").unwrap().is_empty());
    }
}
