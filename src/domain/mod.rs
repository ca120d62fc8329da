pub mod analysis;
pub mod energy;
pub mod forecast;
pub mod policy;

pub use analysis::*;
pub use energy::*;
pub use forecast::*;
pub use policy::*;
