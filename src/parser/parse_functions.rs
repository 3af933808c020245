//! 核心解析函数
//!
//! 在语句边界处把状态机缓冲的 SQL 行与注释行转换为 [`QueryRecord`]：
//! 拆出来源注解、切分注释字段、推断字段值类型。

use crate::parser::constants::{
    DECIMAL_RE, FIELD_KEY_RE, INTEGER_RE, SOURCE_DELIMITER, SOURCE_DELIMITER_FINDER,
};
use crate::parser::state::PendingStatement;
use crate::query::{MetaValue, Metadata, QueryRecord};

/// 由一条语句的缓冲内容构造记录
///
/// 注释行按出现顺序合并，后出现的同名字段覆盖前面的值。
/// 拆出来源注解后 SQL 文本为空的语句返回 `None`。
pub fn build_record(pending: PendingStatement, comment_marker: &str) -> Option<QueryRecord> {
    let (sql, source) = extract_sql(&pending.sql_lines);
    if sql.is_empty() {
        return None;
    }

    let mut metadata = Metadata::new();
    for line in &pending.comment_lines {
        metadata.extend(extract_comment(line, comment_marker));
    }

    Some(QueryRecord {
        sql,
        source,
        metadata,
    })
}

/// 拼接 SQL 行并拆出末尾的来源注解
///
/// 以 `" -- "` 切分拼接后的文本（末尾的空片段被丢弃）：
/// 只有一个片段时没有来源；否则最后一个片段是来源，其余片段重新用 `" -- "` 连接成 SQL。
///
/// # 示例
///
/// ```ignore
/// let (sql, source) = extract_sql(&["SELECT 1 -- app/models/foo.rb:42".to_string()]);
/// assert_eq!(sql, "SELECT 1");
/// assert_eq!(source.as_deref(), Some("app/models/foo.rb:42"));
/// ```
pub fn extract_sql(lines: &[String]) -> (String, Option<String>) {
    let joined = lines.join("\n");

    let mut parts: Vec<&str> = Vec::new();
    let mut start = 0;
    for pos in SOURCE_DELIMITER_FINDER.find_iter(joined.as_bytes()) {
        if pos < start {
            continue;
        }
        parts.push(&joined[start..pos]);
        start = pos + SOURCE_DELIMITER.len();
    }
    parts.push(&joined[start..]);

    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }

    if parts.len() <= 1 {
        let sql = parts.first().map(|s| s.to_string()).unwrap_or_default();
        return (sql, None);
    }

    let source = parts.pop().map(str::to_string);
    (parts.join(SOURCE_DELIMITER), source)
}

/// 解析一行元数据注释
///
/// 去掉注释标记后，以 "单词字符 + `: `" 作为字段键切分，第一个键之前的文本被丢弃，
/// 每个键与其后直到下一个键之间的文本组成一个字段。
/// 没有可识别键的行返回空列表。
///
/// ```text
/// # Query_time: 3.141592  Lock_time: 0.000123  Rows_sent: 10  User: root
/// ```
pub fn extract_comment(line: &str, comment_marker: &str) -> Vec<(String, MetaValue)> {
    let rest = line.strip_prefix(comment_marker).unwrap_or(line);
    let keys: Vec<_> = FIELD_KEY_RE.find_iter(rest).collect();

    keys.iter()
        .enumerate()
        .map(|(i, key)| {
            let value_end = keys.get(i + 1).map_or(rest.len(), |next| next.start());
            let value = clean_fragment(&rest[key.end()..value_end]);
            (clean_fragment(key.as_str()).to_string(), coerce_value(value))
        })
        .collect()
}

/// 按词法规则推断字段值类型
///
/// 全数字 → 整数（溢出 `i64` 时退化为浮点数）；十进制小数 → 浮点数；其余保持字符串。
pub fn coerce_value(value: &str) -> MetaValue {
    if INTEGER_RE.is_match(value) {
        if let Ok(v) = value.parse::<i64>() {
            return MetaValue::Int(v);
        }
        if let Ok(v) = value.parse::<f64>() {
            return MetaValue::Float(v);
        }
    } else if DECIMAL_RE.is_match(value) {
        if let Ok(v) = value.parse::<f64>() {
            return MetaValue::Float(v);
        }
    }
    MetaValue::Text(value.to_string())
}

/// 去掉首尾空白以及一个结尾冒号
#[inline]
fn clean_fragment(fragment: &str) -> &str {
    let trimmed = fragment.trim();
    trimmed.strip_suffix(':').unwrap_or(trimmed)
}
