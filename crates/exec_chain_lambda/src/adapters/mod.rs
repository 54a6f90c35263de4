pub mod invoke;
pub mod notify;
