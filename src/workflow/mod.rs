pub mod answer_order;
pub mod drill_flow;
pub mod question_ctx;

pub use answer_order::AnswerOrder;
pub use drill_flow::{AnswerVerdict, DrillFlow, Prepared, SessionStats};
pub use question_ctx::QuestionCtx;
