use super::OutlineItemNode;
use std::fmt;

/// A non-fatal problem found while reading an outline
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutlineWarning {
    /// The line matched no outline grammar and was dropped
    MalformedLine { line: usize, content: String },
    /// The entry is more than one level deeper than its parent.
    /// It is still attached to that parent.
    LevelJump {
        line: Option<usize>,
        level: u32,
        parent_level: u32,
    },
}

impl fmt::Display for OutlineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineWarning::MalformedLine { line, content } => {
                write!(f, "line {}: invalid outline item: {}", line, content)
            }
            OutlineWarning::LevelJump {
                line,
                level,
                parent_level,
            } => {
                if let Some(line) = line {
                    write!(f, "line {}: ", line)?;
                }
                write!(
                    f,
                    "level {} entry nested directly under level {}",
                    level, parent_level
                )
            }
        }
    }
}

/// Result of parsing outline text: the tree plus everything that was skipped
/// or tolerated along the way
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOutline {
    pub root: OutlineItemNode,
    pub warnings: Vec<OutlineWarning>,
}

impl ParsedOutline {
    /// Lines that were dropped
    pub fn malformed_lines(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, OutlineWarning::MalformedLine { .. }))
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
