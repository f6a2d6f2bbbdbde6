//! Evaluation mode: roll out an agent for a number of seeded episodes
//!
//! Episode `i` is reset with seed `seed + i`, so runs are reproducible. Each
//! episode ends on termination or after `max_steps` steps.
//!
//! # Example
//!
//! ```rust
//! use ml_puzzles::game::graph_coloring::{ColorCountReward, FixedGraphGenerator};
//! use ml_puzzles::game::GraphColoring;
//! use ml_puzzles::modes::{EvaluateMode, EvaluationConfig};
//! use ml_puzzles::rl::RandomAgent;
//!
//! let env = GraphColoring::new(FixedGraphGenerator::petersen(), ColorCountReward);
//! let config = EvaluationConfig {
//!     episodes: 5,
//!     ..Default::default()
//! };
//! let mut mode = EvaluateMode::new(env, RandomAgent::new(0), config);
//! let stats = mode.run();
//! assert_eq!(stats.total_episodes(), 5);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::game::Environment;
use crate::metrics::EpisodeStats;
use crate::rl::Agent;

/// Configuration for evaluation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Number of episodes to run
    pub episodes: usize,

    /// Seed of the first episode
    pub seed: u64,

    /// Step cap per episode
    pub max_steps: usize,

    /// Print progress every N episodes
    pub log_frequency: usize,

    /// Rolling window of the statistics
    pub window_size: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            seed: 0,
            max_steps: 1000,
            log_frequency: 10,
            window_size: 100,
        }
    }
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.episodes == 0 {
            return Err("episodes must be at least 1".to_string());
        }
        if self.max_steps == 0 {
            return Err("max_steps must be at least 1".to_string());
        }
        if self.log_frequency == 0 {
            return Err("log_frequency must be at least 1".to_string());
        }
        if self.window_size == 0 {
            return Err("window_size must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Outcome of a single episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOutcome {
    pub reward: f32,
    pub steps: usize,
    pub solved: bool,
    /// Stopped by `max_steps` rather than by the environment
    pub truncated: bool,
}

/// Runs an agent in an environment and tracks episode statistics
pub struct EvaluateMode<E: Environment, A: Agent<E>> {
    env: E,
    agent: A,
    config: EvaluationConfig,
    stats: EpisodeStats,
}

impl<E: Environment, A: Agent<E>> EvaluateMode<E, A> {
    pub fn new(env: E, agent: A, config: EvaluationConfig) -> Self {
        let stats = EpisodeStats::new(config.window_size.max(1));
        Self {
            env,
            agent,
            config,
            stats,
        }
    }

    /// Run every episode and return the final statistics
    pub fn run(&mut self) -> &EpisodeStats {
        self.print_header();

        for episode in 0..self.config.episodes {
            let seed = self.config.seed.wrapping_add(episode as u64);
            let outcome = self.run_episode(seed);
            self.stats
                .record_episode(outcome.reward, outcome.steps, outcome.solved);

            if (episode + 1) % self.config.log_frequency.max(1) == 0 {
                self.print_progress(episode + 1);
            }
        }

        println!("\nEvaluation complete!");
        println!("{}", self.stats.format_summary());
        info!(
            env = self.env.name(),
            agent = self.agent.name(),
            episodes = self.stats.total_episodes(),
            solved = self.stats.total_solved(),
            "evaluation finished"
        );

        &self.stats
    }

    /// Roll out one episode from `seed`
    pub fn run_episode(&mut self, seed: u64) -> EpisodeOutcome {
        let (mut state, mut observation) = self.env.reset(seed);
        let mut outcome = EpisodeOutcome {
            reward: 0.0,
            steps: 0,
            solved: false,
            truncated: false,
        };

        loop {
            if outcome.steps >= self.config.max_steps {
                outcome.truncated = true;
                debug!(seed, steps = outcome.steps, "episode truncated");
                break;
            }

            let Some(action) = self.agent.select_action(&self.env, &observation) else {
                warn!(seed, steps = outcome.steps, "agent found no legal action");
                break;
            };

            let result = self.env.step(&state, action);
            outcome.reward += result.reward;
            outcome.steps += 1;
            outcome.solved = result.info.solved;
            if result.info.invalid_action {
                warn!(seed, ?action, "agent chose an illegal action");
            }

            state = result.state;
            observation = result.observation;
            if result.terminated {
                break;
            }
        }

        debug!(
            seed,
            reward = outcome.reward,
            steps = outcome.steps,
            solved = outcome.solved,
            "episode finished"
        );
        outcome
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("Evaluation - {} / {}", self.env.name(), self.agent.name());
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.episodes);
        println!("Seeds: {}..", self.config.seed);
        println!("Max steps: {}", self.config.max_steps);
        println!("Logging: Every {} episodes", self.config.log_frequency);
        println!("{}", "=".repeat(70));
        println!();
    }

    fn print_progress(&self, episode: usize) {
        println!(
            "[Episode {}/{}] {}",
            episode,
            self.config.episodes,
            self.stats.format_summary()
        );
    }
}
