pub mod toml_loader;

pub use toml_loader::{
    load_configured_question_set, load_question_set, parse_question_set, BUILTIN_QUESTIONS,
};
