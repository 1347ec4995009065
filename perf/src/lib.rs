//! Runtime animation budgeting: FPS sampling, device capability probing and
//! the knobs UI code reads to scale animation cost.

pub mod advisor;
pub mod clock;
pub mod config;
pub mod image;
pub mod level;
pub mod probe;

pub use advisor::AnimationConfig;
pub use advisor::PerformanceAdvisor;
pub use config::AdvisorConfig;
pub use level::NetworkClass;
pub use level::OptimizationLevel;
