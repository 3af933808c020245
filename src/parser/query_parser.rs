//! QueryParser - 从 Reader 流式读取并解析 QueryRecord
//!
//! 提供了一个惰性迭代器：每次调用 `next` 只读取完成下一条记录所需的行
//! （外加用于识别边界的一行），不会一次性把文件加载进内存。

use std::{
    io::{self, BufRead, BufReader, Read},
    iter::FusedIterator,
};

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::parser::parse_functions::build_record;
use crate::parser::state::{ParserState, StateMachine};
use crate::parser_config::ParserConfig;
use crate::query::QueryRecord;
use crate::tools::LineClassifier;

/// 从 Reader 中按行读取并解析成 QueryRecord 的迭代器
///
/// 读取过程中出现 I/O 错误时产出一次 `Err`，之后迭代结束。
/// 迭代器被丢弃时底层 Reader 随之释放，提前终止（如 `take`）同样如此。
///
/// # 类型参数
///
/// * `R` - 实现了 `Read` trait 的类型
///
/// # 示例
///
/// ```
/// use slow_query_log_analyzer::QueryParser;
///
/// let log = "SET timestamp=1;\nSELECT 1 -- app/models/user.rb:10\n# Query_time: 2.5\nSET timestamp=2;\n";
/// let records: Vec<_> = QueryParser::new(log.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].sql, "SELECT 1");
/// assert_eq!(records[0].query_time(), Some(2.5));
/// ```
pub struct QueryParser<R: Read> {
    reader: BufReader<R>,
    buffer: Vec<u8>,
    classifier: LineClassifier,
    comment_marker: String,
    machine: StateMachine,
    flush_on_eof: bool,
    lines_read: u64,
    finished: bool,
}

impl<R: Read> QueryParser<R> {
    /// 使用默认配置创建解析器
    pub fn new(reader: R) -> Self {
        let classifier = LineClassifier::default();
        Self::from_parts(reader, classifier, false)
    }

    /// 使用自定义配置创建解析器
    ///
    /// 配置无效时返回 `ParseError::InvalidConfig`。
    pub fn with_config(reader: R, config: &ParserConfig) -> Result<Self, ParseError> {
        let classifier = LineClassifier::from_config(config)?;
        Ok(Self::from_parts(reader, classifier, config.flush_on_eof))
    }

    fn from_parts(reader: R, classifier: LineClassifier, flush_on_eof: bool) -> Self {
        Self {
            reader: BufReader::new(reader),
            buffer: Vec::with_capacity(1024),
            comment_marker: classifier.comment_marker().to_string(),
            classifier,
            machine: StateMachine::new(),
            flush_on_eof,
            lines_read: 0,
            finished: false,
        }
    }

    /// 已读取的行数
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// 当前解析状态
    pub fn state(&self) -> ParserState {
        self.machine.state()
    }

    /// 读取下一行并去掉一个行尾换行符（`\n`、`\r\n` 或 `\r`）
    ///
    /// 非 UTF-8 字节按替换字符处理，不会中断解析。
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;

        if bytes_read == 0 {
            return Ok(None);
        }

        self.lines_read += 1;
        let line = chomp(&self.buffer);

        Ok(Some(String::from_utf8_lossy(line).into_owned()))
    }

    /// 输入结束时的处理
    fn finish(&mut self) -> Option<QueryRecord> {
        self.finished = true;
        if !self.machine.has_pending() {
            return None;
        }

        if self.flush_on_eof {
            let pending = self.machine.finish()?;
            return build_record(pending, &self.comment_marker);
        }

        debug!(
            lines_read = self.lines_read,
            "end of input reached with a pending statement, dropping it"
        );
        None
    }
}

/// 只去掉一个行终止符，行内其余的 `\r` 保留
#[inline]
fn chomp(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl<R: Read> Iterator for QueryParser<R> {
    type Item = Result<QueryRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => return self.finish().map(Ok),
                Err(e) => {
                    self.finished = true;
                    return Some(Err(ParseError::IoError(e.to_string())));
                }
            };

            let kind = self.classifier.classify(&line);
            if let Some(pending) = self.machine.feed(line, kind) {
                if let Some(record) = build_record(pending, &self.comment_marker) {
                    trace!(
                        line = self.lines_read,
                        fields = record.metadata.len(),
                        has_source = record.has_source(),
                        "query record emitted"
                    );
                    return Some(Ok(record));
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for QueryParser<R> {}
