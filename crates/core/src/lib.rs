#![forbid(unsafe_code)]

pub mod compose;
pub mod error;
pub mod evaluate;
pub mod model;
pub mod random;
pub mod synth;
pub mod time;

pub use error::Error;
pub use time::Clock;

pub use compose::{ComposeError, compose_percentage_question, compose_rank_question};
pub use evaluate::{PERCENTAGE_TOLERANCE, evaluate};
pub use random::ScriptedSource;
pub use synth::{SynthesisError, SynthesisPolicy, Synthesizer, synthesize};
