//! Getting sound out of the program.

pub mod wav;
