pub mod netmask;
pub mod subnet;
