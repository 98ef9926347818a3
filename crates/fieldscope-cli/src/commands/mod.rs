pub mod layers;
pub mod probe;
pub mod sample;
