pub mod bitmap;
pub mod frame;
