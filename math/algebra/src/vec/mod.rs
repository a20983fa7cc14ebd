mod vec4;

pub use vec4::*;
