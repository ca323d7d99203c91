pub mod grid;
pub mod propagate;
pub mod recorder;
pub mod solver;
pub mod topology;
pub mod viz;

pub use grid::{Digit, Grid};
pub use propagate::Propagator;
pub use recorder::AssignmentLog;
pub use solver::Solver;
pub use topology::{Cell, Topology};
