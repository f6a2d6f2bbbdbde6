//! Application configuration loaded from TOML
//!
//! Every section is optional; missing sections and fields take their defaults.
//!
//! ```toml
//! [sudoku.generator]
//! kind = "database"
//! path = "puzzles.txt"
//!
//! [graph_coloring]
//! num_colors = 5
//!
//! [graph_coloring.generator]
//! kind = "random"
//! num_nodes = 12
//! edge_probability = 0.3
//!
//! [sudoku_network]
//! num_channels = 32
//!
//! [evaluation]
//! episodes = 50
//! max_steps = 200
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{PuzzleError, Result};
use crate::game::{GraphColoringConfig, SudokuConfig};
use crate::modes::EvaluationConfig;
use crate::rl::{GraphColoringActorCriticConfig, SudokuActorCriticConfig};

/// Layer widths of the graph coloring network
///
/// Input and output sizes follow the graph coloring environment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphNetworkConfig {
    pub hidden_layers: Vec<usize>,
}

impl Default for GraphNetworkConfig {
    fn default() -> Self {
        Self {
            hidden_layers: vec![256, 256],
        }
    }
}

impl GraphNetworkConfig {
    pub fn actor_critic(
        &self,
        num_nodes: usize,
        num_colors: usize,
    ) -> GraphColoringActorCriticConfig {
        GraphColoringActorCriticConfig::new(num_nodes, num_colors)
            .with_hidden_layers(self.hidden_layers.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sudoku: SudokuConfig,
    pub graph_coloring: GraphColoringConfig,
    pub sudoku_network: SudokuActorCriticConfig,
    pub graph_network: GraphNetworkConfig,
    pub evaluation: EvaluationConfig,
}

impl AppConfig {
    /// Read and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.sudoku.validate().map_err(PuzzleError::Config)?;
        self.graph_coloring.validate().map_err(PuzzleError::Config)?;
        self.sudoku_network.validate().map_err(PuzzleError::Config)?;
        self.graph_network_config()
            .validate()
            .map_err(PuzzleError::Config)?;
        self.evaluation.validate().map_err(PuzzleError::Config)?;
        Ok(())
    }

    /// Graph network sized for the configured graph coloring environment
    pub fn graph_network_config(&self) -> GraphColoringActorCriticConfig {
        self.graph_network.actor_critic(
            self.graph_coloring.num_nodes(),
            self.graph_coloring.num_colors(),
        )
    }
}
