use super::action::SudokuAction;
use super::board::Board;
use super::generator::DummyGenerator;
use super::reward::SparseReward;
use super::rules::{is_puzzle_solved, SudokuActionMask};
use super::state::SudokuState;
use crate::game::{Environment, Generator, RewardFn, StepInfo, StepResult};
use tracing::{debug, trace};

/// What the agent sees: the board and its action mask
#[derive(Debug, Clone, PartialEq)]
pub struct SudokuObservation {
    pub board: Board,
    pub action_mask: SudokuActionMask,
}

type BoxedGenerator = Box<dyn Generator<State = SudokuState>>;
type BoxedReward = Box<dyn RewardFn<SudokuState, SudokuAction>>;

/// Sudoku environment
///
/// Actions are (row, col, digit) placements. An episode ends when an illegal
/// action is taken or when no legal placement remains, which includes the
/// solved board.
pub struct Sudoku {
    generator: BoxedGenerator,
    reward_fn: BoxedReward,
}

impl Sudoku {
    pub fn new(
        generator: impl Generator<State = SudokuState> + 'static,
        reward_fn: impl RewardFn<SudokuState, SudokuAction> + 'static,
    ) -> Self {
        Self::from_boxed(Box::new(generator), Box::new(reward_fn))
    }

    pub fn from_boxed(generator: BoxedGenerator, reward_fn: BoxedReward) -> Self {
        Self {
            generator,
            reward_fn,
        }
    }
}

impl Default for Sudoku {
    fn default() -> Self {
        Self::new(DummyGenerator::new(), SparseReward)
    }
}

impl Environment for Sudoku {
    type State = SudokuState;
    type Action = SudokuAction;
    type Observation = SudokuObservation;

    fn name(&self) -> &'static str {
        "sudoku"
    }

    fn reset(&self, seed: u64) -> (SudokuState, SudokuObservation) {
        let state = self.generator.generate(seed);
        debug!(
            seed,
            clues = state.clue_count(),
            legal_actions = state.action_mask().count(),
            "sudoku reset"
        );
        let observation = self.observe(&state);
        (state, observation)
    }

    fn step(
        &self,
        state: &SudokuState,
        action: SudokuAction,
    ) -> StepResult<SudokuState, SudokuObservation> {
        let (next_state, invalid_action) = match state.place(action) {
            Some(next) => (next, false),
            None => {
                debug!(%action, step = state.steps(), "illegal sudoku action");
                (state.advanced(), true)
            }
        };

        let no_actions_available = !next_state.action_mask().any();
        let terminated = invalid_action || no_actions_available;
        let reward = self
            .reward_fn
            .reward(state, &action, &next_state, terminated);
        let solved = is_puzzle_solved(next_state.board());

        trace!(%action, reward, terminated, solved, "sudoku step");

        let observation = self.observe(&next_state);
        StepResult {
            state: next_state,
            observation,
            reward,
            terminated,
            info: StepInfo {
                invalid_action,
                solved,
            },
        }
    }

    fn observe(&self, state: &SudokuState) -> SudokuObservation {
        SudokuObservation {
            board: *state.board(),
            action_mask: state.action_mask().clone(),
        }
    }

    fn legal_actions(&self, observation: &SudokuObservation) -> Vec<SudokuAction> {
        observation.action_mask.legal_actions()
    }
}
