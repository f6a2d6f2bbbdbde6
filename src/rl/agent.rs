//! Action selection policies
//!
//! An agent maps an observation to one of the environment's legal actions.
//! Every agent returns `None` when the observation has no legal action left.

use burn::tensor::{activation::softmax, backend::Backend, Tensor};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::network::{GraphColoringActorCritic, SudokuActorCritic};
use super::observation::{graph_batch, sudoku_batch};
use crate::game::{
    Environment, GraphColoring, GraphColoringObservation, Sudoku, SudokuAction, SudokuObservation,
};

pub trait Agent<E: Environment> {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    fn select_action(&mut self, env: &E, observation: &E::Observation) -> Option<E::Action>;
}

/// Picks uniformly among the legal actions
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<E: Environment> Agent<E> for RandomAgent {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_action(&mut self, env: &E, observation: &E::Observation) -> Option<E::Action> {
        env.legal_actions(observation).choose(&mut self.rng).copied()
    }
}

/// How a network agent turns logits into an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Highest logit
    Greedy,
    /// Draw from the softmax over legal actions
    Sample,
}

/// Drives the Sudoku actor-critic
#[derive(Debug)]
pub struct SudokuNetworkAgent<B: Backend> {
    network: SudokuActorCritic<B>,
    device: B::Device,
    selection: Selection,
    rng: StdRng,
}

impl<B: Backend> SudokuNetworkAgent<B> {
    pub fn new(
        network: SudokuActorCritic<B>,
        device: B::Device,
        selection: Selection,
        seed: u64,
    ) -> Self {
        Self {
            network,
            device,
            selection,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<B: Backend> Agent<Sudoku> for SudokuNetworkAgent<B> {
    fn name(&self) -> &'static str {
        "sudoku_network"
    }

    fn select_action(
        &mut self,
        _env: &Sudoku,
        observation: &SudokuObservation,
    ) -> Option<SudokuAction> {
        if !observation.action_mask.any() {
            return None;
        }
        let (boards, masks) = sudoku_batch::<B>(std::slice::from_ref(observation), &self.device);
        let logits = self.network.policy_logits(boards, masks);
        let legal = observation.action_mask.to_flat();
        let index = select_index(logits, &legal, self.selection, &mut self.rng)?;
        SudokuAction::from_index(index)
    }
}

/// Drives the graph coloring actor-critic
#[derive(Debug)]
pub struct GraphColoringNetworkAgent<B: Backend> {
    network: GraphColoringActorCritic<B>,
    device: B::Device,
    selection: Selection,
    rng: StdRng,
}

impl<B: Backend> GraphColoringNetworkAgent<B> {
    pub fn new(
        network: GraphColoringActorCritic<B>,
        device: B::Device,
        selection: Selection,
        seed: u64,
    ) -> Self {
        Self {
            network,
            device,
            selection,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<B: Backend> Agent<GraphColoring> for GraphColoringNetworkAgent<B> {
    fn name(&self) -> &'static str {
        "graph_coloring_network"
    }

    fn select_action(
        &mut self,
        _env: &GraphColoring,
        observation: &GraphColoringObservation,
    ) -> Option<usize> {
        if !observation.action_mask.iter().any(|&legal| legal) {
            return None;
        }
        let (features, masks) = graph_batch::<B>(std::slice::from_ref(observation), &self.device);
        let (logits, _) = self.network.forward(features, masks);
        select_index(logits, &observation.action_mask, self.selection, &mut self.rng)
    }
}

/// Pick an action index from masked logits of shape [1, A]
fn select_index<B: Backend>(
    logits: Tensor<B, 2>,
    legal: &[bool],
    selection: Selection,
    rng: &mut impl Rng,
) -> Option<usize> {
    match selection {
        Selection::Greedy => {
            let index = logits.argmax(1).into_data().iter::<i64>().next()? as usize;
            legal.get(index).copied().unwrap_or(false).then_some(index)
        }
        Selection::Sample => {
            let probs: Vec<f32> = softmax(logits, 1).into_data().iter::<f32>().collect();
            sample_categorical(&probs, legal, rng)
        }
    }
}

/// Draw an index from `probs`, restricted to legal entries
///
/// Falls back to the last legal index when rounding leaves the cumulative sum
/// short of the draw.
fn sample_categorical(probs: &[f32], legal: &[bool], rng: &mut impl Rng) -> Option<usize> {
    let total: f32 = probs
        .iter()
        .zip(legal)
        .filter_map(|(&p, &l)| l.then_some(p))
        .sum();
    let random_val: f32 = rng.gen::<f32>() * total;
    let mut cumsum = 0.0;
    let mut last_legal = None;

    for (idx, (&prob, &is_legal)) in probs.iter().zip(legal).enumerate() {
        if !is_legal {
            continue;
        }
        cumsum += prob;
        last_legal = Some(idx);
        if random_val < cumsum {
            return Some(idx);
        }
    }

    last_legal
}
