use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ml_puzzles::game::{Environment, GraphColoring, Sudoku};
use ml_puzzles::modes::{EvaluateMode, EvaluationConfig};
use ml_puzzles::render::{render_graph, render_sudoku};
use ml_puzzles::rl::{
    default_device, load_graph_network, load_sudoku_network, save_graph_network,
    save_sudoku_network, Agent, GraphColoringNetworkAgent, InferenceBackend, NetworkSpec,
    RandomAgent, Selection, SudokuNetworkAgent,
};
use ml_puzzles::AppConfig;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ml_puzzles")]
#[command(version, about = "Sudoku and graph coloring RL environments")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an agent for a number of seeded episodes
    Evaluate {
        #[arg(long, value_enum)]
        env: EnvKind,

        #[arg(long, value_enum, default_value = "random")]
        agent: AgentKind,

        /// Number of episodes (overrides the config file)
        #[arg(long)]
        episodes: Option<usize>,

        /// Seed of the first episode (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Step cap per episode (overrides the config file)
        #[arg(long)]
        max_steps: Option<usize>,

        /// Saved model, required for the network agent
        #[arg(long)]
        model: Option<PathBuf>,

        /// Take the highest-scoring action instead of sampling
        #[arg(long)]
        greedy: bool,
    },

    /// Save a freshly initialized network
    InitModel {
        #[arg(long, value_enum)]
        env: EnvKind,

        /// Output path; weights go to `<out>.mpk`, metadata to `<out>.meta.json`
        #[arg(long)]
        out: PathBuf,
    },

    /// Print the initial puzzle for a seed
    Show {
        #[arg(long, value_enum)]
        env: EnvKind,

        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EnvKind {
    Sudoku,
    GraphColoring,
}

#[derive(Clone, Copy, ValueEnum)]
enum AgentKind {
    /// Uniform over legal actions
    Random,
    /// Actor-critic loaded from --model
    Network,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ml_puzzles={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Evaluate {
            env,
            agent,
            episodes,
            seed,
            max_steps,
            model,
            greedy,
        } => {
            let mut evaluation = config.evaluation.clone();
            if let Some(episodes) = episodes {
                evaluation.episodes = episodes;
            }
            if let Some(seed) = seed {
                evaluation.seed = seed;
            }
            if let Some(max_steps) = max_steps {
                evaluation.max_steps = max_steps;
            }
            evaluation
                .validate()
                .map_err(anyhow::Error::msg)
                .context("Invalid evaluation settings")?;

            let selection = if greedy {
                Selection::Greedy
            } else {
                Selection::Sample
            };
            run_evaluate(&config, env, agent, model.as_deref(), selection, evaluation)
        }
        Commands::InitModel { env, out } => init_model(&config, env, &out),
        Commands::Show { env, seed } => show(&config, env, seed),
    }
}

fn build_sudoku(config: &AppConfig) -> Result<Sudoku> {
    config
        .sudoku
        .build_environment()
        .context("Failed to build the sudoku environment")
}

fn build_graph_coloring(config: &AppConfig) -> Result<GraphColoring> {
    config
        .graph_coloring
        .build_environment()
        .context("Failed to build the graph coloring environment")
}

fn require_model(model: Option<&Path>) -> Result<&Path> {
    model.context("--model is required for the network agent")
}

fn run_evaluate(
    config: &AppConfig,
    env_kind: EnvKind,
    agent_kind: AgentKind,
    model: Option<&Path>,
    selection: Selection,
    evaluation: EvaluationConfig,
) -> Result<()> {
    let agent_seed = evaluation.seed;
    let device = default_device();

    match (env_kind, agent_kind) {
        (EnvKind::Sudoku, AgentKind::Random) => {
            evaluate(build_sudoku(config)?, RandomAgent::new(agent_seed), evaluation);
        }
        (EnvKind::GraphColoring, AgentKind::Random) => {
            evaluate(build_graph_coloring(config)?, RandomAgent::new(agent_seed), evaluation);
        }
        (EnvKind::Sudoku, AgentKind::Network) => {
            let (network, metadata) =
                load_sudoku_network::<InferenceBackend>(require_model(model)?, &device)?;
            info!(version = %metadata.version, "loaded sudoku network");
            let agent = SudokuNetworkAgent::new(network, device, selection, agent_seed);
            evaluate(build_sudoku(config)?, agent, evaluation);
        }
        (EnvKind::GraphColoring, AgentKind::Network) => {
            let (network, metadata) =
                load_graph_network::<InferenceBackend>(require_model(model)?, &device)?;
            let expected = config.graph_network_config();
            if let NetworkSpec::GraphColoring(saved) = &metadata.network {
                let saved_dims = (saved.num_nodes, saved.num_colors);
                let expected_dims = (expected.num_nodes, expected.num_colors);
                if saved_dims != expected_dims {
                    bail!(
                        "model expects {} nodes and {} colors, environment has {} nodes and {} \
                         colors",
                        saved.num_nodes,
                        saved.num_colors,
                        expected.num_nodes,
                        expected.num_colors
                    );
                }
            }
            info!(version = %metadata.version, "loaded graph coloring network");
            let agent = GraphColoringNetworkAgent::new(network, device, selection, agent_seed);
            evaluate(build_graph_coloring(config)?, agent, evaluation);
        }
    }

    Ok(())
}

fn evaluate<E: Environment, A: Agent<E>>(env: E, agent: A, evaluation: EvaluationConfig) {
    let mut mode = EvaluateMode::new(env, agent, evaluation);
    mode.run();
}

fn init_model(config: &AppConfig, env_kind: EnvKind, out: &Path) -> Result<()> {
    let device = default_device();
    match env_kind {
        EnvKind::Sudoku => {
            let network_config = &config.sudoku_network;
            let network = network_config.init::<InferenceBackend>(&device);
            save_sudoku_network(&network, network_config, out)
                .with_context(|| format!("Failed to save model to {:?}", out))?;
        }
        EnvKind::GraphColoring => {
            let network_config = config.graph_network_config();
            let network = network_config.init::<InferenceBackend>(&device);
            save_graph_network(&network, &network_config, out)
                .with_context(|| format!("Failed to save model to {:?}", out))?;
        }
    }
    println!("Model saved to: {:?}", out);
    Ok(())
}

fn show(config: &AppConfig, env_kind: EnvKind, seed: u64) -> Result<()> {
    match env_kind {
        EnvKind::Sudoku => {
            let env = build_sudoku(config)?;
            let (_, obs) = env.reset(seed);
            print!("{}", render_sudoku(&obs));
        }
        EnvKind::GraphColoring => {
            let env = build_graph_coloring(config)?;
            let (_, obs) = env.reset(seed);
            print!("{}", render_graph(&obs));
        }
    }
    Ok(())
}
