//! 查询流组合器
//!
//! 在记录迭代器上提供惰性的过滤操作，组合后仍然是迭代器，
//! 可以继续使用标准库的 `map`、`take`、`skip` 等方法。
//!
//! ```
//! use slow_query_log_analyzer::{parse_queries_from_string, QueryStreamExt};
//!
//! let log = "\
//! SET timestamp=1;
//! SELECT 1 -- app/models/user.rb:10
//! ## Query_time: 2
//! SELECT 2 -- app/models/order.rb:7
//! ## Query_time: 6
//! SELECT 3
//! ## Query_time: 10
//! SET timestamp=2;
//! ";
//!
//! let slow: Vec<_> = parse_queries_from_string(log)
//!     .into_iter()
//!     .slower_than(5.0)
//!     .from_source("models")
//!     .unwrap()
//!     .map(|q| q.sql)
//!     .collect();
//!
//! assert_eq!(slow, vec!["SELECT 2"]);
//! ```

use regex::Regex;

use crate::error::ParseError;
use crate::query::QueryRecord;

/// 可以被组合器检查的迭代项
///
/// `Result` 中的错误不参与过滤，原样向下游传递。
pub trait RecordItem {
    /// 判断该项是否保留
    fn retain_by<F>(&self, predicate: F) -> bool
    where
        F: FnOnce(&QueryRecord) -> bool;
}

impl RecordItem for QueryRecord {
    fn retain_by<F>(&self, predicate: F) -> bool
    where
        F: FnOnce(&QueryRecord) -> bool,
    {
        predicate(self)
    }
}

impl RecordItem for &QueryRecord {
    fn retain_by<F>(&self, predicate: F) -> bool
    where
        F: FnOnce(&QueryRecord) -> bool,
    {
        predicate(*self)
    }
}

impl<E> RecordItem for Result<QueryRecord, E> {
    fn retain_by<F>(&self, predicate: F) -> bool
    where
        F: FnOnce(&QueryRecord) -> bool,
    {
        match self {
            Ok(record) => predicate(record),
            Err(_) => true,
        }
    }
}

/// 记录迭代器的扩展方法
pub trait QueryStreamExt: Iterator + Sized
where
    Self::Item: RecordItem,
{
    /// 只保留 `Query_time` 严格大于 `seconds` 的记录
    ///
    /// 没有 `Query_time` 或其值不是数值的记录被排除。
    fn slower_than(self, seconds: f64) -> SlowerThan<Self> {
        SlowerThan {
            inner: self,
            seconds,
        }
    }

    /// 只保留来源注解匹配正则 `pattern` 的记录
    ///
    /// 匹配是"包含"语义（不要求整串匹配），没有来源注解的记录被排除。
    fn from_source(self, pattern: &str) -> Result<FromSource<Self>, ParseError> {
        let regex = Regex::new(pattern).map_err(|e| ParseError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self.from_source_regex(regex))
    }

    /// 与 [`from_source`](QueryStreamExt::from_source) 相同，使用已编译的正则
    fn from_source_regex(self, pattern: Regex) -> FromSource<Self> {
        FromSource {
            inner: self,
            pattern,
        }
    }
}

impl<I> QueryStreamExt for I
where
    I: Iterator,
    I::Item: RecordItem,
{
}

/// [`QueryStreamExt::slower_than`] 返回的迭代器
#[derive(Debug, Clone)]
pub struct SlowerThan<I> {
    inner: I,
    seconds: f64,
}

impl<I> Iterator for SlowerThan<I>
where
    I: Iterator,
    I::Item: RecordItem,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let seconds = self.seconds;
        self.inner
            .find(|item| item.retain_by(|record| record.is_slower_than(seconds)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// [`QueryStreamExt::from_source`] 返回的迭代器
#[derive(Debug, Clone)]
pub struct FromSource<I> {
    inner: I,
    pattern: Regex,
}

impl<I> Iterator for FromSource<I>
where
    I: Iterator,
    I::Item: RecordItem,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let pattern = &self.pattern;
        self.inner
            .find(|item| item.retain_by(|record| record.source_matches(pattern)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}
