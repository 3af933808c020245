//! 绑定到日志文件路径的分析入口
//!
//! [`SlowQueryLog`] 只保存路径和配置，不保存读取位置：
//! 每次调用 `queries`、`slower_than` 或 `from_source` 都会重新打开文件并从头读取。

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::ParseError;
use crate::parser::{QueryParser, iter_queries_from_file_with_config};
use crate::parser_config::ParserConfig;
use crate::query_stream::{FromSource, QueryStreamExt, SlowerThan};

/// 慢查询日志文件
///
/// # 示例
///
/// ```no_run
/// use slow_query_log_analyzer::SlowQueryLog;
///
/// let log = SlowQueryLog::new("/data/mysql/slow-query.log");
/// for record in log.slower_than(5.0)?.filter_map(Result::ok).filter(|q| q.has_source()).take(3) {
///     println!("{:?} {:?} {}", record.query_time(), record.source, record.sql);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SlowQueryLog {
    path: PathBuf,
    config: ParserConfig,
}

impl SlowQueryLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_config(path, ParserConfig::default())
    }

    pub fn with_config<P: AsRef<Path>>(path: P, config: ParserConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// 从头读取全部记录（惰性）
    pub fn queries(&self) -> Result<QueryParser<File>, ParseError> {
        iter_queries_from_file_with_config(&self.path, &self.config)
    }

    /// 执行时间严格大于 `seconds` 的记录
    pub fn slower_than(&self, seconds: f64) -> Result<SlowerThan<QueryParser<File>>, ParseError> {
        Ok(self.queries()?.slower_than(seconds))
    }

    /// 来源注解匹配正则 `pattern` 的记录
    pub fn from_source(&self, pattern: &str) -> Result<FromSource<QueryParser<File>>, ParseError> {
        self.queries()?.from_source(pattern)
    }
}
