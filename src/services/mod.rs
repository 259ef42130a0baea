pub mod chat;
pub mod genres;
pub mod providers;

pub use chat::{ChatReply, ChatService};
pub use genres::GenreClassifier;
