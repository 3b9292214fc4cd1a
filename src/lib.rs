pub mod emotion;
pub mod generate;
pub mod melody;
pub mod note;
pub mod output;
pub mod synth;
pub mod wave;

// Utility modules
pub mod rational;
pub mod util;
