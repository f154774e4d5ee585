pub mod fleet_reader;
pub mod instance_reader;
pub mod scenario;
pub mod solution_writer;
pub mod summary;
