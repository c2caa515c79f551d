//! File writers shared by every geometry backend.

pub mod step;
pub mod stl;

pub use step::{write_step, StepWriter};
pub use stl::{write_stl, STL_EXTENSION};
