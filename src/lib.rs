//! # Slow Query Log Analyzer
//!
//! 一个流式的 MySQL 慢查询日志解析器，把 SQL 语句与其后的元数据注释行
//! 组合成结构化的查询记录，并提供惰性的、可组合的过滤器。
//!
//! ## 功能特性
//!
//! - **流式解析**: 按需逐行读取，支持远大于内存的日志文件
//! - **显式状态机**: 语句边界识别逻辑集中在一个三态状态机中
//! - **类型化元数据**: 字段值按词法规则推断为整数、浮点数或字符串
//! - **可组合过滤**: `slower_than`、`from_source` 与标准迭代器方法自由组合
//!
//! ## 快速开始
//!
//! ### 从文件流式读取
//!
//! ```rust,no_run
//! use slow_query_log_analyzer::{iter_queries_from_file, QueryStreamExt};
//!
//! let slowest = iter_queries_from_file("slow-query.log")?
//!     .slower_than(5.0)
//!     .from_source("app/models")?
//!     .take(3);
//!
//! for record in slowest {
//!     let record = record?;
//!     println!("{:?} {:?} {}", record.query_time(), record.source, record.sql);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### 从字符串解析
//!
//! ```rust
//! use slow_query_log_analyzer::{parse_queries_from_string, MetaValue};
//!
//! let log = "\
//! SET timestamp=1364375213;
//! SELECT * FROM users WHERE id = 1 -- app/models/user.rb:42
//! ## Query_time: 3.141592  Lock_time: 0.000123  Rows_sent: 10  User: root
//! SET timestamp=1364375214;
//! ";
//!
//! let records = parse_queries_from_string(log);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].sql, "SELECT * FROM users WHERE id = 1");
//! assert_eq!(records[0].source.as_deref(), Some("app/models/user.rb:42"));
//! assert_eq!(records[0].get("Rows_sent"), Some(&MetaValue::Int(10)));
//! ```
//!
//! ## 日志格式
//!
//! ```text
//! /usr/sbin/mysqld, Version: 5.5.28-log. started with:
//! use production;
//! SET timestamp=1364375213;
//! SELECT * FROM users -- app/models/user.rb:42
//! # Query_time: 6.000000  Lock_time: 0.000050 Rows_sent: 1  Rows_examined: 120
//! ```
//!
//! 第一条 `SET`/`SHOW`/`ANALYZE`/`USE` 语句之前的内容被视为文件头并丢弃。
//! 语句在其后的注释块结束（遇到下一条非注释行）时输出，
//! 因此默认情况下位于文件末尾、后面没有任何非注释行的语句不会输出，
//! 可通过 [`ParserConfig::with_flush_on_eof`] 改变这一行为。

pub mod analyzer;
pub mod error;
pub mod parser;
pub mod parser_config;
pub mod query;
pub mod query_stream;
pub mod tools;

pub use analyzer::SlowQueryLog;
pub use error::ParseError;
pub use parser::{
    ParserState,
    QueryParser,
    iter_queries_from_file,
    iter_queries_from_file_with_config,
    parse_queries_from_file,
    parse_queries_from_string,
};
pub use parser_config::ParserConfig;
pub use query::{MetaValue, Metadata, QueryRecord};
pub use query_stream::{FromSource, QueryStreamExt, RecordItem, SlowerThan};
