//! Parser 配置模块
//!
//! 把行分类使用的关键字、注释标记以及文件结束时的行为集中到配置里，
//! 日志格式有差异时只需调整配置，而不需要修改状态机。

use crate::error::ParseError;

/// 默认跳过的管理类语句关键字
pub const DEFAULT_SKIP_KEYWORDS: [&str; 4] = ["SET", "SHOW", "ANALYZE", "USE"];

/// 默认的注释行前缀
pub const DEFAULT_COMMENT_MARKER: &str = "# ";

/// Parser 配置
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserConfig {
    /// 需要跳过的语句关键字（不区分大小写，关键字后必须紧跟一个空格）
    pub skip_keywords: Vec<String>,

    /// 注释行前缀
    pub comment_marker: String,

    /// 文件结束时是否输出尚未遇到边界的最后一条语句
    ///
    /// 默认为 `false`：最后一条语句只有在后面出现非注释行时才会输出，
    /// 位于文件末尾的语句会被丢弃。
    pub flush_on_eof: bool,
}

impl ParserConfig {
    /// MySQL 慢查询日志的默认配置
    pub fn mysql_default() -> Self {
        Self {
            skip_keywords: DEFAULT_SKIP_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
            flush_on_eof: false,
        }
    }

    pub fn with_skip_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }

    pub fn with_flush_on_eof(mut self, flush: bool) -> Self {
        self.flush_on_eof = flush;
        self
    }

    /// 校验配置
    ///
    /// 空的注释标记会让每一行都被当作注释，因此视为无效；
    /// 空的关键字列表表示不跳过任何语句。
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.comment_marker.is_empty() {
            return Err(ParseError::InvalidConfig(
                "comment marker must not be empty".to_string(),
            ));
        }
        if let Some(kw) = self.skip_keywords.iter().find(|kw| kw.trim().is_empty()) {
            return Err(ParseError::InvalidConfig(format!(
                "skip keyword must not be blank: {:?}",
                kw
            )));
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::mysql_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.skip_keywords, vec!["SET", "SHOW", "ANALYZE", "USE"]);
        assert_eq!(config.comment_marker, "# ");
        assert!(!config.flush_on_eof);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ParserConfig::default()
            .with_skip_keywords(["SET", "COMMIT"])
            .with_comment_marker("-- ")
            .with_flush_on_eof(true);

        assert_eq!(config.skip_keywords, vec!["SET", "COMMIT"]);
        assert_eq!(config.comment_marker, "-- ");
        assert!(config.flush_on_eof);
    }

    #[test]
    fn test_validate_rejects_empty_marker() {
        let config = ParserConfig::default().with_comment_marker("");
        assert!(matches!(
            config.validate(),
            Err(ParseError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_keyword() {
        let config = ParserConfig::default().with_skip_keywords(["SET", " "]);
        assert!(config.validate().is_err());

        let config = ParserConfig::default().with_skip_keywords(Vec::<String>::new());
        assert!(config.validate().is_ok());
    }
}
