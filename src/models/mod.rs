pub mod mission;
pub mod product;

pub use mission::*;
pub use product::*;
