pub mod serial;
pub mod thermometer;
