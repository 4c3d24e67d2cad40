//! HTTP Layer - RESTful API
//!
//! /health、/voices、/tts、/clone 路由及中间件

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{build_router, HttpServer};
pub use state::{AppState, StateOptions};
