#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod history_service;
pub mod ports;
pub mod sessions;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, HistoryServiceError, QuizError};
pub use history_service::{HistoryService, RESET_PROMPT};
pub use ports::{Confirm, Decision, FeedbackView, Notice, Presenter, QuestionView};

pub use sessions::{
    ABORT_PROMPT, AnsweredQuestion, POOL_SIZE, PoolPlan, PoolSelector, QuizController, QuizPhase,
    QuizProgress, QuizSession, QuizState,
};
