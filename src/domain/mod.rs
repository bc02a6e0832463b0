pub mod acquisition;
pub mod aggregate;
