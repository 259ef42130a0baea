pub mod message;
pub mod movie;
pub mod platform;

pub use message::{Message, Sender};
pub use movie::{CatalogMovie, GenreQuery, MovieCard, SortOrder};
pub use platform::ProviderFilter;
