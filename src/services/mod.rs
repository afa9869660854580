pub mod policy;
pub mod sessions;
pub mod submission;
pub mod transport;
