pub mod coerce;
pub mod forms;
pub mod validate;
