use serde::{Deserialize, Serialize};

use super::PieceSeed;

/// Settings a host chooses before the first tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// Starting level preselected on the START screen.
    pub start_level: usize,
    /// Seed for the piece sequence; `None` picks a random one.
    pub seed: Option<PieceSeed>,
}
