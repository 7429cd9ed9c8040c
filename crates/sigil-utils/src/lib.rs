pub mod convert;
pub mod id;
