pub mod job;
pub mod presign;
