use super::graph_coloring::{
    ColorCountReward, FixedGraphGenerator, GraphColoring, RandomGraphGenerator,
};
use super::sudoku::{DatabaseGenerator, DummyGenerator, SparseReward, Sudoku};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where Sudoku puzzles come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SudokuGeneratorConfig {
    /// The built-in puzzle, every episode
    Fixed,
    /// Uniform draw from a puzzle file
    Database { path: PathBuf },
}

/// Configuration for the Sudoku environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SudokuConfig {
    pub generator: SudokuGeneratorConfig,
}

impl Default for SudokuConfig {
    fn default() -> Self {
        Self {
            generator: SudokuGeneratorConfig::Fixed,
        }
    }
}

impl SudokuConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let SudokuGeneratorConfig::Database { path } = &self.generator {
            if path.as_os_str().is_empty() {
                return Err("sudoku database path must not be empty".to_string());
            }
        }
        Ok(())
    }

    /// Build the environment; database files are read here
    pub fn build_environment(&self) -> Result<Sudoku> {
        let env = match &self.generator {
            SudokuGeneratorConfig::Fixed => Sudoku::new(DummyGenerator::new(), SparseReward),
            SudokuGeneratorConfig::Database { path } => {
                Sudoku::new(DatabaseGenerator::load(path)?, SparseReward)
            }
        };
        Ok(env)
    }
}

/// Where graphs come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphGeneratorConfig {
    /// The Petersen graph, every episode
    Fixed,
    /// A fresh random graph per seed
    Random {
        num_nodes: usize,
        edge_probability: f64,
    },
}

/// Configuration for the graph coloring environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphColoringConfig {
    pub generator: GraphGeneratorConfig,
    /// Number of available colors; defaults to one per node
    pub num_colors: Option<usize>,
}

impl Default for GraphColoringConfig {
    fn default() -> Self {
        Self {
            generator: GraphGeneratorConfig::Random {
                num_nodes: 20,
                edge_probability: 0.8,
            },
            num_colors: None,
        }
    }
}

impl GraphColoringConfig {
    pub fn num_nodes(&self) -> usize {
        match self.generator {
            GraphGeneratorConfig::Fixed => FixedGraphGenerator::petersen().adj_matrix().num_nodes(),
            GraphGeneratorConfig::Random { num_nodes, .. } => num_nodes,
        }
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors.unwrap_or_else(|| self.num_nodes())
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if let GraphGeneratorConfig::Random {
            num_nodes,
            edge_probability,
        } = self.generator
        {
            if num_nodes == 0 {
                return Err("graph num_nodes must be at least 1".to_string());
            }
            if !(0.0..=1.0).contains(&edge_probability) {
                return Err(format!(
                    "edge_probability must be in [0, 1], got {edge_probability}"
                ));
            }
        }
        if self.num_colors == Some(0) {
            return Err("num_colors must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn build_environment(&self) -> Result<GraphColoring> {
        let num_colors = self.num_colors();
        let env = match self.generator {
            GraphGeneratorConfig::Fixed => {
                let petersen = FixedGraphGenerator::petersen().adj_matrix().clone();
                GraphColoring::new(
                    FixedGraphGenerator::new(petersen, num_colors)?,
                    ColorCountReward,
                )
            }
            GraphGeneratorConfig::Random {
                num_nodes,
                edge_probability,
            } => GraphColoring::new(
                RandomGraphGenerator::new(num_nodes, edge_probability, num_colors)?,
                ColorCountReward,
            ),
        };
        Ok(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Environment;

    #[test]
    fn test_default_configs() {
        let sudoku = SudokuConfig::default();
        assert_eq!(sudoku.generator, SudokuGeneratorConfig::Fixed);
        assert!(sudoku.validate().is_ok());

        let graph = GraphColoringConfig::default();
        assert_eq!(graph.num_nodes(), 20);
        assert_eq!(graph.num_colors(), 20);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_graph_validation() {
        let mut config = GraphColoringConfig {
            num_colors: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.num_colors = Some(3);
        config.generator = GraphGeneratorConfig::Random {
            num_nodes: 5,
            edge_probability: 1.2,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_fixed_graph_with_color_override() {
        let config = GraphColoringConfig {
            generator: GraphGeneratorConfig::Fixed,
            num_colors: Some(3),
        };
        let env = config.build_environment().unwrap();
        let (state, _) = env.reset(0);
        assert_eq!(state.num_nodes(), 10);
        assert_eq!(state.num_colors(), 3);
    }

    #[test]
    fn test_build_sudoku_from_missing_database() {
        let config = SudokuConfig {
            generator: SudokuGeneratorConfig::Database {
                path: PathBuf::from("/definitely/not/here.txt"),
            },
        };
        assert!(config.validate().is_ok());
        assert!(config.build_environment().is_err());
    }

    #[test]
    fn test_generator_config_from_toml() {
        let config: GraphColoringConfig = toml::from_str(
            r#"
            num_colors = 4

            [generator]
            kind = "random"
            num_nodes = 8
            edge_probability = 0.3
            "#,
        )
        .unwrap();
        assert_eq!(config.num_nodes(), 8);
        assert_eq!(config.num_colors(), 4);

        let sudoku: SudokuConfig = toml::from_str(
            r#"
            [generator]
            kind = "database"
            path = "puzzles.txt"
            "#,
        )
        .unwrap();
        assert_eq!(
            sudoku.generator,
            SudokuGeneratorConfig::Database {
                path: PathBuf::from("puzzles.txt")
            }
        );
    }
}
