mod boundary_cond;
mod config;
mod error;
mod system;
mod thomas;

pub use boundary_cond::{BottomDirichlet, BoundaryCondition, NodeParams, StencilRow};
pub use config::{ModelConfig, SolverConfig};
pub use error::{RichardsError, RichardsResult};
pub use system::TridiagonalSystem;
pub use thomas::{Thomas, thomas_solve};
