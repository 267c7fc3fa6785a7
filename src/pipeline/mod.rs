//! Pipeline module - the EDA stages in run order

pub mod correlation;
pub mod distribution;
pub mod features;
pub mod frame;
pub mod impute;
pub mod loader;
pub mod missing;
pub mod ordered;
pub mod overview;
pub mod run;
pub mod schema;

pub use correlation::*;
pub use distribution::*;
pub use features::*;
pub use impute::*;
pub use loader::*;
pub use missing::*;
pub use ordered::OrderedMap;
pub use overview::*;
pub use run::*;
pub use schema::*;
