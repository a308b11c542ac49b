pub mod loaders;
pub mod question;

pub use loaders::{load_configured_question_set, load_question_set};
pub use question::{Answer, Credential, Question, QuestionSet};
