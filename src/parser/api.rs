//! 便捷 API 函数
//!
//! 提供了一组方便使用的高层 API，用于快速解析慢查询日志。

use crate::error::ParseError;
use crate::parser::query_parser::QueryParser;
use crate::parser_config::ParserConfig;
use crate::query::QueryRecord;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::debug;

/// 打开日志文件，不存在时返回 `FileNotFound`
fn open_log_file(path: &Path) -> Result<File, ParseError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ParseError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => ParseError::IoError(format!("{}: {}", path.display(), e)),
    })?;
    debug!(path = %path.display(), "opened slow query log");
    Ok(file)
}

/// 从文件读取并返回 QueryRecord 迭代器（流式处理）
///
/// 文件在调用时立即打开，因此文件不存在会在这里直接报错，
/// 而不是得到一个空的迭代器。之后每次迭代只读取需要的行。
///
/// # 参数
///
/// * `path` - 日志文件路径
///
/// # 返回
///
/// * `Ok(QueryParser)` - 惰性迭代器，迭代项是 `Result<QueryRecord, ParseError>`
/// * `Err(ParseError)` - 文件打开错误
///
/// # 示例
///
/// ```no_run
/// use slow_query_log_analyzer::{iter_queries_from_file, QueryStreamExt};
///
/// for record in iter_queries_from_file("slow-query.log")?.slower_than(5.0).take(3) {
///     let record = record?;
///     println!("{:?} {}", record.query_time(), record.sql);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn iter_queries_from_file<P>(path: P) -> Result<QueryParser<File>, ParseError>
where
    P: AsRef<Path>,
{
    let file = open_log_file(path.as_ref())?;
    Ok(QueryParser::new(file))
}

/// 使用自定义配置从文件读取并返回 QueryRecord 迭代器
pub fn iter_queries_from_file_with_config<P>(
    path: P,
    config: &ParserConfig,
) -> Result<QueryParser<File>, ParseError>
where
    P: AsRef<Path>,
{
    let file = open_log_file(path.as_ref())?;
    QueryParser::with_config(file, config)
}

/// 从文件读取并解析全部记录
///
/// 会把所有记录加载到内存，只适合小文件；大文件请使用 [`iter_queries_from_file`]。
///
/// # 返回
///
/// * `Ok((Vec<QueryRecord>, Vec<ParseError>))` - 成功解析的记录和读取过程中遇到的错误
/// * `Err(ParseError)` - 文件打开错误
pub fn parse_queries_from_file<P>(path: P) -> Result<(Vec<QueryRecord>, Vec<ParseError>), ParseError>
where
    P: AsRef<Path>,
{
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for result in iter_queries_from_file(path)? {
        match result {
            Ok(record) => records.push(record),
            Err(err) => errors.push(err),
        }
    }

    Ok((records, errors))
}

/// 从字符串解析全部记录
///
/// # 示例
///
/// ```
/// use slow_query_log_analyzer::parse_queries_from_string;
///
/// let log = "use shop;\nSELECT * FROM orders;\n# Query_time: 6  Rows_sent: 10\nSET timestamp=1;\n";
/// let records = parse_queries_from_string(log);
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].sql, "SELECT * FROM orders;");
/// assert_eq!(records[0].query_time(), Some(6.0));
/// ```
pub fn parse_queries_from_string(content: &str) -> Vec<QueryRecord> {
    // 内存输入不会产生 I/O 错误
    QueryParser::new(content.as_bytes())
        .filter_map(Result::ok)
        .collect()
}
