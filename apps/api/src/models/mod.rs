pub mod candidate;
pub mod template;
