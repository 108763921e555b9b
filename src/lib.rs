pub mod chat;
pub mod models;
pub mod pipeline;
pub mod tools;
