use serde::{Deserialize, Serialize};

/// The three combinable axes of the output volume. X and Y are fixed by the
/// source planes and never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Z,
    Channel,
    Time,
}

impl Dimension {
    /// Named capture group a pattern for this dimension must define.
    pub fn group_name(self) -> &'static str {
        match self {
            Dimension::Z => "Z",
            Dimension::Channel => "C",
            Dimension::Time => "T",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Dimension::Z => "Z",
            Dimension::Channel => "Channel",
            Dimension::Time => "Time",
        };
        formatter.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PixelType {
    U8,
    U16,
    #[default]
    F32,
}
