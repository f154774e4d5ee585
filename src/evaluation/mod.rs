pub mod cost;
pub mod selector;
pub mod simulator;

pub use selector::{best_vehicle, BestVehicle};
