//! Model persistence for actor-critic networks
//!
//! A saved model consists of two files:
//! - `<path>.mpk` - Network weights (Burn named MessagePack record)
//! - `<path>.meta.json` - Metadata as JSON, enough to rebuild the network

use super::network::{
    GraphColoringActorCritic, GraphColoringActorCriticConfig, SudokuActorCritic,
    SudokuActorCriticConfig,
};
use anyhow::{bail, Context, Result};
use burn::{
    module::Module,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
    tensor::backend::Backend,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Which network a model file holds, with the configuration to rebuild it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "env", rename_all = "snake_case")]
pub enum NetworkSpec {
    Sudoku(SudokuActorCriticConfig),
    GraphColoring(GraphColoringActorCriticConfig),
}

impl NetworkSpec {
    pub fn env_name(&self) -> &'static str {
        match self {
            NetworkSpec::Sudoku(_) => "sudoku",
            NetworkSpec::GraphColoring(_) => "graph_coloring",
        }
    }
}

/// Metadata saved with the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub network: NetworkSpec,

    /// Crate version that wrote the model
    pub version: String,
}

impl ModelMetadata {
    pub fn new(network: NetworkSpec) -> Self {
        Self {
            network,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

fn metadata_path(path: &Path) -> std::path::PathBuf {
    path.with_extension("meta.json")
}

/// Save weights and metadata, creating parent directories if needed
fn save_module<B: Backend, M: Module<B>>(
    module: &M,
    metadata: &ModelMetadata,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    recorder
        .record(module.clone().into_record(), path.to_path_buf())
        .context("Failed to save network weights")?;

    let meta_path = metadata_path(path);
    let meta_json =
        serde_json::to_string_pretty(metadata).context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    info!(path = %path.display(), env = metadata.network.env_name(), "saved model");
    Ok(())
}

/// Read the metadata stored next to a model
pub fn load_metadata(path: &Path) -> Result<ModelMetadata> {
    let meta_path = metadata_path(path);
    let meta_json = std::fs::read_to_string(&meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
    serde_json::from_str(&meta_json).context("Failed to deserialize metadata")
}

fn load_record<B: Backend, M: Module<B>>(module: M, path: &Path, device: &B::Device) -> Result<M> {
    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    let record = recorder
        .load(path.to_path_buf(), device)
        .with_context(|| format!("Failed to load network weights from {:?}", path))?;
    Ok(module.load_record(record))
}

pub fn save_sudoku_network<B: Backend>(
    network: &SudokuActorCritic<B>,
    config: &SudokuActorCriticConfig,
    path: &Path,
) -> Result<()> {
    let metadata = ModelMetadata::new(NetworkSpec::Sudoku(config.clone()));
    save_module(network, &metadata, path)
}

/// Load a Sudoku network; fails if the file holds a different network
pub fn load_sudoku_network<B: Backend>(
    path: &Path,
    device: &B::Device,
) -> Result<(SudokuActorCritic<B>, ModelMetadata)> {
    let metadata = load_metadata(path)?;
    let NetworkSpec::Sudoku(config) = &metadata.network else {
        bail!(
            "{:?} holds a {} network, expected sudoku",
            path,
            metadata.network.env_name()
        );
    };

    let network = load_record(config.init::<B>(device), path, device)?;
    Ok((network, metadata))
}

pub fn save_graph_network<B: Backend>(
    network: &GraphColoringActorCritic<B>,
    config: &GraphColoringActorCriticConfig,
    path: &Path,
) -> Result<()> {
    let metadata = ModelMetadata::new(NetworkSpec::GraphColoring(config.clone()));
    save_module(network, &metadata, path)
}

/// Load a graph coloring network; fails if the file holds a different network
pub fn load_graph_network<B: Backend>(
    path: &Path,
    device: &B::Device,
) -> Result<(GraphColoringActorCritic<B>, ModelMetadata)> {
    let metadata = load_metadata(path)?;
    let NetworkSpec::GraphColoring(config) = &metadata.network else {
        bail!(
            "{:?} holds a {} network, expected graph_coloring",
            path,
            metadata.network.env_name()
        );
    };

    let network = load_record(config.init::<B>(device), path, device)?;
    Ok((network, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{default_device, InferenceBackend};
    use burn::tensor::{Bool, Tensor, TensorData};
    use tempfile::TempDir;

    fn small_sudoku_config() -> SudokuActorCriticConfig {
        SudokuActorCriticConfig {
            num_channels: 4,
            policy_layers: vec![8],
            value_layers: vec![8],
        }
    }

    #[test]
    fn test_metadata_serialization() {
        let metadata = ModelMetadata::new(NetworkSpec::GraphColoring(
            GraphColoringActorCriticConfig::new(10, 4),
        ));
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"env\":\"graph_coloring\""));

        let deserialized: ModelMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, metadata);
        assert_eq!(deserialized.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_sudoku_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models").join("sudoku");
        let device = default_device();
        let config = small_sudoku_config();
        let network = config.init::<InferenceBackend>(&device);

        save_sudoku_network(&network, &config, &path).unwrap();
        assert!(path.with_extension("meta.json").exists());

        let (loaded, metadata) = load_sudoku_network::<InferenceBackend>(&path, &device).unwrap();
        assert_eq!(metadata.network, NetworkSpec::Sudoku(config));

        let boards = Tensor::<InferenceBackend, 4>::ones([1, 1, 9, 9], &device);
        let mask = Tensor::<InferenceBackend, 2, Bool>::from_data(
            TensorData::new(vec![true; 729], [1, 729]),
            &device,
        );
        let (expected, expected_value) = network.forward(boards.clone(), mask.clone());
        let (actual, actual_value) = loaded.forward(boards, mask);
        expected.into_data().assert_approx_eq(&actual.into_data(), 5);
        expected_value
            .into_data()
            .assert_approx_eq(&actual_value.into_data(), 5);
    }

    #[test]
    fn test_graph_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("graph");
        let device = default_device();
        let config = GraphColoringActorCriticConfig::new(4, 3).with_hidden_layers(vec![8]);
        let network = config.init::<InferenceBackend>(&device);

        save_graph_network(&network, &config, &path).unwrap();
        let (loaded, metadata) = load_graph_network::<InferenceBackend>(&path, &device).unwrap();
        assert_eq!(metadata.network, NetworkSpec::GraphColoring(config.clone()));

        let features = Tensor::<InferenceBackend, 2>::ones([1, config.input_dim()], &device);
        let mask = Tensor::<InferenceBackend, 2, Bool>::from_data(
            TensorData::new(vec![true; 3], [1, 3]),
            &device,
        );
        let (expected, _) = network.forward(features.clone(), mask.clone());
        let (actual, _) = loaded.forward(features, mask);
        expected.into_data().assert_approx_eq(&actual.into_data(), 5);
    }

    #[test]
    fn test_wrong_network_kind_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sudoku");
        let device = default_device();
        let config = small_sudoku_config();
        save_sudoku_network(&config.init::<InferenceBackend>(&device), &config, &path).unwrap();

        let err = load_graph_network::<InferenceBackend>(&path, &device).unwrap_err();
        assert!(err.to_string().contains("expected graph_coloring"));
    }

    #[test]
    fn test_missing_model() {
        let dir = TempDir::new().unwrap();
        let device = default_device();
        let result = load_sudoku_network::<InferenceBackend>(&dir.path().join("nope"), &device);
        assert!(result.is_err());
    }
}
