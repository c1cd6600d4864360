pub mod jobs;
pub mod local;
#[cfg(test)]
pub mod memory;
pub mod run;
pub mod s3;
pub mod storage;
pub mod transfer;

pub use run::run_app;
pub use s3::S3Manager;
pub use storage::ObjectStore;
