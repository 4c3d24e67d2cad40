//! Serverless Front-End
//!
//! 单任务 JSON 处理器，无 HTTP 状态码概念

mod handler;
mod job;

pub use handler::ServerlessHandler;
pub use job::{JobInput, JobOutput, JobSuccess, ServerlessJob, DEFAULT_JOB_SPEAKER};
