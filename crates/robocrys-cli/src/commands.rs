pub mod describe;
pub mod features;
