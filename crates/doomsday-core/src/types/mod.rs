mod audit;
mod device;
mod firmware;

pub use audit::*;
pub use device::*;
pub use firmware::*;
