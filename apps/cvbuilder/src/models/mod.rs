pub mod resume;

pub use resume::{ContactKind, Resume};
