// Writing assistant: request shaping, tool dispatch, and the assist route.
// All LLM calls happen inside the prompt toolkit, never here.

pub mod dispatcher;
pub mod handlers;
pub mod request;
