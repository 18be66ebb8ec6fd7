pub mod blog;
pub mod gallery;
