pub mod fetch;
pub mod flatten;
