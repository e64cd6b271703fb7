use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pattern::{DISABLED, PatternError, PatternSet};

use super::Result;

/// Run configuration for one combine, loadable from a JSON or YAML recipe.
/// Pattern values are [`DISABLED`], a preset key, or a raw regex with the
/// dimension's named capture group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CombineSpec {
    pub channel_pattern: String,
    pub z_pattern: String,
    pub time_pattern: String,
    /// Explicit channel names replacing the first-seen table.
    pub channel_names: Option<Vec<String>>,
    /// Palette names assigned to channels by position.
    pub channel_colours: Option<Vec<String>>,
    /// Substring restricting the source selection to one group.
    pub filter_names: Option<String>,
    /// Regex whose distinct matches over source names partition the
    /// collection into independent groups (e.g. one per well).
    pub group_pattern: Option<String>,
    pub output_name: Option<String>,
}

impl Default for CombineSpec {
    fn default() -> Self {
        Self {
            channel_pattern: DISABLED.to_string(),
            z_pattern: DISABLED.to_string(),
            time_pattern: DISABLED.to_string(),
            channel_names: None,
            channel_colours: None,
            filter_names: None,
            group_pattern: None,
            output_name: None,
        }
    }
}

impl CombineSpec {
    pub fn patterns(&self) -> std::result::Result<PatternSet, PatternError> {
        PatternSet::compile(&self.channel_pattern, &self.z_pattern, &self.time_pattern)
    }

    pub fn group_regex(&self) -> std::result::Result<Option<Regex>, PatternError> {
        match &self.group_pattern {
            None => Ok(None),
            Some(pattern) => Ok(Some(Regex::new(pattern)?)),
        }
    }

    /// Compiles every configured pattern so a bad recipe fails before any
    /// store traffic.
    pub fn validate(&self) -> Result<()> {
        self.patterns()?;
        self.group_regex()?;
        Ok(())
    }

    /// Name given to the created image: the filter string when partitioning,
    /// otherwise the configured or default output name.
    pub fn image_name(&self) -> String {
        self.filter_names
            .clone()
            .filter(|filter| !filter.is_empty())
            .or_else(|| self.output_name.clone())
            .unwrap_or_else(|| "combinedImage".to_string())
    }
}
