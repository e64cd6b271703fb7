use regex::Regex;

use crate::model::Dimension;

use super::{PatternError, Result};

/// Pattern value meaning "do not extract this dimension".
pub const DISABLED: &str = "None";

/// Preset keys recognized for one dimension, in documentation order.
pub fn preset_keys(dimension: Dimension) -> &'static [&'static str] {
    match dimension {
        Dimension::Channel => &["_C", "C", "_c", "_w", "Channel"],
        Dimension::Z => &["_Z", "Z", "_z"],
        Dimension::Time => &["_T", "T", "_t", "Time"],
    }
}

/// Well-known shorthand patterns for common filename conventions. Anything
/// not listed here is compiled as a raw regex with the dimension's named
/// capture group.
pub fn preset(dimension: Dimension, key: &str) -> Option<&'static str> {
    match dimension {
        Dimension::Channel => match key {
            "_C" => Some(r"_C(?P<C>.+?)(_|$)"),
            "C" => Some(r"C(?P<C>\w+?)"),
            "_c" => Some(r"_c(?P<C>\w+?)"),
            "_w" => Some(r"_w(?P<C>\w+?)"),
            "Channel" => Some(r"Channel(?P<C>.+?)(_|$)"),
            _ => None,
        },
        Dimension::Z => match key {
            "_Z" => Some(r"_Z(?P<Z>\d+)"),
            "Z" => Some(r"Z(?P<Z>\d+)"),
            "_z" => Some(r"_z(?P<Z>\d+)"),
            _ => None,
        },
        Dimension::Time => match key {
            "_T" => Some(r"_T(?P<T>\d+)"),
            "T" => Some(r"T(?P<T>\d+)"),
            "_t" => Some(r"_t(?P<T>\d+)"),
            "Time" => Some(r"Time(?P<T>\d+)"),
            _ => None,
        },
    }
}

/// One validated matcher per combinable dimension, each either compiled with
/// the required named capture group or explicitly disabled.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    z: Option<Regex>,
    channel: Option<Regex>,
    time: Option<Regex>,
}

impl PatternSet {
    /// Compiles one pattern per dimension. Each value is [`DISABLED`], a
    /// preset key, or a raw regex containing the dimension's named group.
    pub fn compile(channel: &str, z: &str, time: &str) -> Result<Self> {
        Ok(Self {
            z: compile_one(Dimension::Z, z)?,
            channel: compile_one(Dimension::Channel, channel)?,
            time: compile_one(Dimension::Time, time)?,
        })
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn matcher(&self, dimension: Dimension) -> Option<&Regex> {
        match dimension {
            Dimension::Z => self.z.as_ref(),
            Dimension::Channel => self.channel.as_ref(),
            Dimension::Time => self.time.as_ref(),
        }
    }

    pub fn is_enabled(&self, dimension: Dimension) -> bool {
        self.matcher(dimension).is_some()
    }
}

fn compile_one(dimension: Dimension, value: &str) -> Result<Option<Regex>> {
    if value == DISABLED {
        return Ok(None);
    }
    let pattern = preset(dimension, value).unwrap_or(value);
    let regex = Regex::new(pattern)?;
    let group = dimension.group_name();
    let has_group = regex
        .capture_names()
        .flatten()
        .any(|name| name == group);
    if !has_group {
        return Err(PatternError::MissingCaptureGroup {
            dimension,
            pattern: pattern.to_string(),
            group,
        });
    }
    Ok(Some(regex))
}
