mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::QuizError;
pub use plan::{POOL_SIZE, PoolPlan, PoolSelector};
pub use progress::QuizProgress;
pub use service::{Advance, AnsweredQuestion, QuizSession};
pub use workflow::{ABORT_PROMPT, QuizController, QuizPhase, QuizState};
