pub mod dweet;
pub mod http;
pub mod wifi;
