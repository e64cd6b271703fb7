use crate::model::Dimension;

use super::PatternSet;

/// Raw text captured from one plane name, one optional token per dimension.
/// Absence is the only failure signal at this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTokens {
    pub z: Option<String>,
    pub channel: Option<String>,
    pub time: Option<String>,
}

impl RawTokens {
    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Z => self.z.as_deref(),
            Dimension::Channel => self.channel.as_deref(),
            Dimension::Time => self.time.as_deref(),
        }
    }
}

/// Applies every enabled matcher to `name`. Never fails: a disabled
/// dimension or a non-matching name yields an absent token.
pub fn extract(name: &str, patterns: &PatternSet) -> RawTokens {
    RawTokens {
        z: capture(name, patterns, Dimension::Z),
        channel: capture(name, patterns, Dimension::Channel),
        time: capture(name, patterns, Dimension::Time),
    }
}

fn capture(name: &str, patterns: &PatternSet, dimension: Dimension) -> Option<String> {
    patterns
        .matcher(dimension)?
        .captures(name)?
        .name(dimension.group_name())
        .map(|token| token.as_str().to_string())
}
