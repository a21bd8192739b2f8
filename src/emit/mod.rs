//! Declaration synthesis and emission planning.

pub mod planner;
pub mod synthesis;

pub use planner::{plan, GeneratedUnit, SynthesizedRequest};
pub use synthesis::synthesize_request;
