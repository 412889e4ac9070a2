pub mod change;
pub mod program;
pub mod target;
pub mod variant;
