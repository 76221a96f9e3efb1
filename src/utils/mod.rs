pub mod middleware;
pub mod slug;
pub mod text;
pub mod validation;
