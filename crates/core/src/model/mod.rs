mod bank;
mod history;
mod ids;
mod mode;
mod question;
mod result;
mod status;

pub use bank::{BankError, QuestionBank};
pub use history::History;
pub use ids::{ParseIdError, QuestionId};
pub use mode::{ParseModeError, QuizMode};
pub use question::{Question, QuestionDraft, QuestionError};
pub use result::{QuizResult, QuizResultError};
pub use status::MenuStatus;
