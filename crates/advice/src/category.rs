use core::fmt;

use serde::{Deserialize, Serialize};

/// Footprint category.
///
/// Declaration order is the display order of both the breakdown and the
/// suggestion list (`Overall` last).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Transport,
    Electricity,
    Diet,
    Waste,
    Overall,
}

impl Category {
    /// Categories that take part in the breakdown.
    pub const MEASURED: [Category; 4] = [
        Category::Transport,
        Category::Electricity,
        Category::Diet,
        Category::Waste,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transport => "transport",
            Category::Electricity => "electricity",
            Category::Diet => "diet",
            Category::Waste => "waste",
            Category::Overall => "overall",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
