//! Drawing tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines how a segment is blended into the annotation layer
/// and which size setting applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Ink, blended source-over using the pen size and style
    #[default]
    Pen,
    /// Removes ink (destination-out) using the eraser size
    Eraser,
}

impl ToolMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Eraser => "eraser",
        }
    }
}

impl std::str::FromStr for ToolMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pen" => Ok(Self::Pen),
            "eraser" => Ok(Self::Eraser),
            _ => Err(()),
        }
    }
}
