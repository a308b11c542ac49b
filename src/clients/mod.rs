pub mod llm_client;

pub use llm_client::{parse_answer, ChatMessage, ChatRequest, ChatTransport, HttpReply, HttpTransport};
