//! Environment, generator and reward abstractions shared by every puzzle

use std::fmt;

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// The action was not allowed by the action mask and was not applied
    pub invalid_action: bool,
    /// The puzzle is solved after this step
    pub solved: bool,
}

/// Result of an environment step
///
/// The previous state is left untouched; `state` is the successor snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult<S, O> {
    /// State after the action
    pub state: S,
    /// Observation of `state`
    pub observation: O,
    /// Reward for this step
    pub reward: f32,
    /// Whether the episode has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// Produces the initial state of an episode from a seed
///
/// Implementations must be deterministic: the same seed always yields the
/// same state.
pub trait Generator: Send + Sync {
    type State;

    fn generate(&self, seed: u64) -> Self::State;
}

/// Computes the reward of a transition
pub trait RewardFn<S, A>: Send + Sync {
    fn reward(&self, state: &S, action: &A, next_state: &S, done: bool) -> f32;
}

/// A puzzle environment with pure `reset` / `step` transitions
///
/// Environments hold no per-episode data. The state is passed in and a new
/// state is returned, so many episodes can be driven from one environment.
pub trait Environment {
    type State: Clone + fmt::Debug;
    type Action: Copy + fmt::Debug + PartialEq;
    type Observation: Clone + fmt::Debug;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Start a new episode
    fn reset(&self, seed: u64) -> (Self::State, Self::Observation);

    /// Apply `action` to `state`
    fn step(
        &self,
        state: &Self::State,
        action: Self::Action,
    ) -> StepResult<Self::State, Self::Observation>;

    /// Observation of a state
    fn observe(&self, state: &Self::State) -> Self::Observation;

    /// All actions currently allowed by the observation's action mask
    fn legal_actions(&self, observation: &Self::Observation) -> Vec<Self::Action>;
}
