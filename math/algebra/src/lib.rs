#[macro_use]
mod marcos;

pub mod mat;
pub mod vec;

pub use mat::*;
pub use vec::*;
