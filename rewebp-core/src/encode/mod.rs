pub mod codec;
pub mod webp;
