pub mod context;
pub mod ipv4;
