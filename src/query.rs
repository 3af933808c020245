//! 查询记录数据结构
//!
//! 一条 [`QueryRecord`] 对应慢查询日志中的一条 SQL 语句，
//! 以及紧随其后的注释块中解析出的执行统计信息。

use std::fmt;

use regex::Regex;

/// 元数据中 `Query_time` 字段的键名
pub const QUERY_TIME_KEY: &str = "Query_time";

/// 元数据字段值
///
/// 解析时按词法规则推断类型：全数字为整数，十进制小数为浮点数，其余为字符串。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MetaValue {
    /// 整数，如 `Rows_sent: 10`
    Int(i64),
    /// 浮点数，如 `Query_time: 3.141592`
    Float(f64),
    /// 字符串，如 `User: root`
    Text(String),
}

impl MetaValue {
    /// 以浮点数形式读取数值，字符串返回 `None`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Int(v) => Some(*v as f64),
            MetaValue::Float(v) => Some(*v),
            MetaValue::Text(_) => None,
        }
    }

    /// 读取整数值，仅 `Int` 返回 `Some`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetaValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// 读取字符串值，仅 `Text` 返回 `Some`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, MetaValue::Text(_))
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Int(v) => write!(f, "{}", v),
            MetaValue::Float(v) => write!(f, "{}", v),
            MetaValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Int(v)
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        MetaValue::Float(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::Text(v.to_string())
    }
}

/// 按插入顺序保存的元数据映射
///
/// 键唯一；重复插入同一个键时覆盖旧值，但保留该键第一次出现的位置。
/// 一条记录的字段通常只有十个左右，线性查找足够快。
///
/// 启用 `serde` 特性时序列化为按插入顺序排列的对象；反序列化经由 [`Metadata::insert`]，
/// 因此重复的键以最后出现的值为准。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入字段，返回被覆盖的旧值（如果有）
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) -> Option<MetaValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// 获取字段值
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历所有字段
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, MetaValue)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (K, MetaValue)>>(iter: T) -> Self {
        let mut metadata = Metadata::new();
        metadata.extend(iter);
        metadata
    }
}

impl<K: Into<String>> Extend<(K, MetaValue)> for Metadata {
    fn extend<T: IntoIterator<Item = (K, MetaValue)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(feature = "serde")]
mod metadata_serde {
    use std::fmt;

    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use serde::ser::{Serialize, SerializeMap, Serializer};

    use super::{MetaValue, Metadata};

    impl Serialize for Metadata {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }

    struct MetadataVisitor;

    impl<'de> Visitor<'de> for MetadataVisitor {
        type Value = Metadata;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of metadata fields")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Metadata, A::Error> {
            let mut metadata = Metadata::new();
            while let Some((key, value)) = access.next_entry::<String, MetaValue>()? {
                metadata.insert(key, value);
            }
            Ok(metadata)
        }
    }

    impl<'de> Deserialize<'de> for Metadata {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(MetadataVisitor)
        }
    }
}

/// 一条慢查询记录
///
/// 由解析器在检测到语句边界时一次性构造，构造后解析器不再持有它。
/// 解析器只输出 `sql` 非空的记录；[`QueryRecord::new`] 不做这项检查。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryRecord {
    /// 完整 SQL 文本（多行时以 `\n` 拼接），不含来源注解；解析器输出的记录中不为空
    pub sql: String,

    /// 应用程序的来源位置注解（SQL 末尾 ` -- ` 之后的部分）
    pub source: Option<String>,

    /// 注释块中的统计字段，如 `Query_time`、`Lock_time`、`Rows_sent`
    pub metadata: Metadata,
}

impl QueryRecord {
    pub fn new(sql: impl Into<String>, source: Option<String>, metadata: Metadata) -> Self {
        Self {
            sql: sql.into(),
            source,
            metadata,
        }
    }

    /// 按键读取元数据字段
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }

    /// 获取 `Query_time`（秒），缺失或不是数值时返回 `None`
    pub fn query_time(&self) -> Option<f64> {
        self.get(QUERY_TIME_KEY).and_then(MetaValue::as_f64)
    }

    /// 执行时间是否严格大于 `seconds`
    ///
    /// 没有 `Query_time` 的记录视为不匹配。
    pub fn is_slower_than(&self, seconds: f64) -> bool {
        self.query_time().is_some_and(|t| t > seconds)
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// 来源注解是否匹配给定正则；没有来源注解的记录视为不匹配
    pub fn source_matches(&self, pattern: &Regex) -> bool {
        self.source.as_deref().is_some_and(|s| pattern.is_match(s))
    }
}
