pub mod author;
pub mod book;
pub mod errors;
pub mod pagination;
pub mod value_objects;

pub use author::*;
pub use book::*;
pub use errors::*;
pub use pagination::*;
pub use value_objects::*;
