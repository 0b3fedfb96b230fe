//! HTTP API handlers for vsum-eval

pub mod buildinfo;
pub mod evaluate;
pub mod health;

pub use buildinfo::get_build_info;
pub use evaluate::{batch_evaluate, evaluate_summary, quick_evaluate};
pub use health::health_routes;
