mod chat;
mod health;
mod upload;

pub use chat::{chat_handler, simple_chat_handler};
pub use health::{health_handler, root_handler};
pub use upload::upload_handler;
