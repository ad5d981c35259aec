pub mod sanitize;
pub mod slugline;
pub mod text;
