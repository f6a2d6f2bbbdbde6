//! Episode statistics for evaluation runs
//!
//! Tracks rewards, lengths and solve flags over a rolling window, plus totals
//! over the whole run.

use std::collections::VecDeque;

/// Episode statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use ml_puzzles::metrics::EpisodeStats;
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record_episode(1.0, 64, true);
/// stats.record_episode(0.0, 12, false);
///
/// assert_eq!(stats.total_episodes(), 2);
/// assert!((stats.solve_rate() - 0.5).abs() < 1e-6);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Whether each episode ended solved (rolling window)
    episode_solved: VecDeque<bool>,

    total_episodes: usize,
    total_steps: usize,
    total_solved: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl EpisodeStats {
    /// Create a tracker keeping the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_solved: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            total_solved: 0,
            window_size,
        }
    }

    /// Record the end of an episode
    pub fn record_episode(&mut self, reward: f32, length: usize, solved: bool) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_solved, solved, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        if solved {
            self.total_solved += 1;
        }
    }

    /// Mean episode reward over the rolling window, 0.0 when empty
    pub fn mean_episode_reward(&self) -> f32 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<f32>() / self.episode_rewards.len() as f32
        }
    }

    /// Mean episode length over the rolling window
    pub fn mean_episode_length(&self) -> f32 {
        let sum: usize = self.episode_lengths.iter().sum();
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_lengths.len() as f32
        }
    }

    /// Fraction of solved episodes in the rolling window
    pub fn solve_rate(&self) -> f32 {
        if self.episode_solved.is_empty() {
            0.0
        } else {
            let solved = self.episode_solved.iter().filter(|&&s| s).count();
            solved as f32 / self.episode_solved.len() as f32
        }
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn total_solved(&self) -> usize {
        self.total_solved
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Solved: {} | Reward: {:.2} | Len: {:.1} | \
             Solve rate: {:.1}%",
            self.total_episodes,
            self.total_steps,
            self.total_solved,
            self.mean_episode_reward(),
            self.mean_episode_length(),
            self.solve_rate() * 100.0,
        )
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
