pub mod chat;
pub mod select;
pub mod shared;

pub use chat::ChatView;
pub use select::ModelSelectView;
