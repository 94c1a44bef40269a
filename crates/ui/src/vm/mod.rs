mod markup;
mod quiz_vm;
mod time_fmt;

pub use markup::{option_label, sanitize_html};
pub use quiz_vm::{
    FeedbackVm, FinalVm, MenuStatusVm, QuestionVm, QuizIntent, QuizScreenVm, Screen,
};
pub use time_fmt::format_elapsed;
