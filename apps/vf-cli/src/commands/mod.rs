pub mod diff;
pub mod po;
pub mod status;
