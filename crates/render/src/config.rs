use serde::{Deserialize, Serialize};

/// Switches controlling how much syntax context surrounds each line of interest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Prefix each line with its 1-based number
    pub line_number: bool,

    /// Show the header lines of every scope enclosing a line of interest
    pub parent_context: bool,

    /// Show a sample of the scopes nested under a line of interest
    pub child_context: bool,

    /// Show the file's last line and its enclosing scopes
    pub last_line: bool,

    /// Always show this many lines from the top of the file
    pub margin: usize,

    /// Mark lines of interest with a solid bar instead of `│`
    pub mark_lois: bool,

    /// Extra lines shown above and below each line of interest
    pub loi_pad: usize,

    /// Longest header kept for a multi-line scope
    pub header_max: usize,

    /// Also show scopes that start on the first line of the file
    pub show_top_of_file_parent_scope: bool,
}

impl Default for ContextConfig {
    /// Compact settings used for repository maps
    fn default() -> Self {
        Self {
            line_number: true,
            parent_context: true,
            child_context: false,
            last_line: false,
            margin: 0,
            mark_lois: false,
            loi_pad: 0,
            header_max: 10,
            show_top_of_file_parent_scope: false,
        }
    }
}

impl ContextConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.header_max == 0 {
            return Err("header_max must be > 0".to_string());
        }
        Ok(())
    }
}
