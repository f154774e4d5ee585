pub mod fleet;
pub mod geo;
pub mod instance;

pub type Num = f64;

/// Dense index of an order within `Instance::orders`.
pub type OrderId = usize;

/// Index of a vehicle type within `Instance::fleet`.
pub type VehicleTypeId = usize;
