pub mod openai;

pub use openai::{OpenAIChatRequest, OpenAIChatResponse};
