pub mod errors;
pub mod link;
pub mod workspace;
