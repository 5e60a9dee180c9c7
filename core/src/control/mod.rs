pub mod edge;
pub mod sampler;

pub use edge::EdgeDetector;
pub use sampler::{ControlSampler, Controls, ExecutionMode, transition};
