//! Parser 模块 - 解析慢查询日志
//!
//! 此模块提供了完整的日志解析功能,包括:
//! - 语句边界识别状态机
//! - 由缓冲行构造 QueryRecord
//! - 流式读取和解析
//! - 便捷 API 函数

mod api;
mod constants;
pub(crate) mod parse_functions;
pub mod query_parser;
pub mod state;

pub use api::{
    iter_queries_from_file, iter_queries_from_file_with_config, parse_queries_from_file,
    parse_queries_from_string,
};
pub use query_parser::QueryParser;
pub use state::{ParserState, PendingStatement, StateMachine};
