//! Backend type alias and device management
//!
//! The networks are small enough that the CPU NdArray backend is all the
//! evaluation and model tooling needs. Gradient checks in the tests wrap it in
//! `Autodiff`.

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend used to run networks (no gradient tracking)
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
///
/// # Example
///
/// ```rust
/// use ml_puzzles::rl::{default_device, InferenceBackend, SudokuActorCriticConfig};
///
/// let device = default_device();
/// let network = SudokuActorCriticConfig::default().init::<InferenceBackend>(&device);
/// ```
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_device_calls() {
        let device1 = default_device();
        let device2 = default_device();
        assert_eq!(device1, device2);
    }
}
