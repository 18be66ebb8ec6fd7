//! Server-rendered HTML built with `maud`. Splices are escaped; only the
//! sanitized Markdown body goes in as `PreEscaped`.

pub mod blog;
pub mod gallery;
pub mod layout;
