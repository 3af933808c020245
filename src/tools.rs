//! 行分类工具
//!
//! 把慢查询日志中的每一行归为三类之一：需要跳过的管理语句、
//! 元数据注释行，以及其他行（SQL 语句正文或文件头部的杂项）。

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::error::ParseError;
use crate::parser_config::{DEFAULT_COMMENT_MARKER, DEFAULT_SKIP_KEYWORDS, ParserConfig};

/// 默认配置下的行分类器，避免每次创建解析器都重新编译正则
static DEFAULT_CLASSIFIER: Lazy<LineClassifier> = Lazy::new(|| {
    let skip = build_skip_regex(DEFAULT_SKIP_KEYWORDS.iter().copied())
        .expect("default skip keywords compile");
    LineClassifier {
        skip,
        comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
    }
});

/// 行的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `SET`/`SHOW`/`ANALYZE`/`USE` 等管理语句，永远不进入 SQL 文本
    SkipStatement,
    /// 以 `# ` 开头的元数据注释行
    CommentLine,
    /// 其他行
    Other,
}

/// 按配置对行进行分类
#[derive(Debug, Clone)]
pub struct LineClassifier {
    skip: Option<Regex>,
    comment_marker: String,
}

impl LineClassifier {
    /// 根据配置构建分类器
    pub fn from_config(config: &ParserConfig) -> Result<Self, ParseError> {
        config.validate()?;
        Ok(Self {
            skip: build_skip_regex(config.skip_keywords.iter().map(String::as_str))?,
            comment_marker: config.comment_marker.clone(),
        })
    }

    pub fn comment_marker(&self) -> &str {
        &self.comment_marker
    }

    /// 对一行（已去掉换行符）进行分类
    ///
    /// 注释标记优先于跳过语句判断。
    #[inline]
    pub fn classify(&self, line: &str) -> LineKind {
        if line.starts_with(self.comment_marker.as_str()) {
            LineKind::CommentLine
        } else if self.skip.as_ref().is_some_and(|re| re.is_match(line)) {
            LineKind::SkipStatement
        } else {
            LineKind::Other
        }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        DEFAULT_CLASSIFIER.clone()
    }
}

/// 关键字列表为空时返回 `None`（不跳过任何行）
fn build_skip_regex<'a, I>(keywords: I) -> Result<Option<Regex>, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let alternatives: Vec<String> = keywords
        .into_iter()
        .map(|kw| format!("{} ", regex::escape(kw.trim())))
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }

    let pattern = format!("^(?:{})", alternatives.join("|"));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| ParseError::InvalidPattern {
            pattern,
            reason: e.to_string(),
        })
}

/// 使用默认配置判断是否为元数据注释行
#[inline]
pub fn is_comment_line(line: &str) -> bool {
    DEFAULT_CLASSIFIER.classify(line) == LineKind::CommentLine
}

/// 使用默认配置判断是否为需要跳过的管理语句
#[inline]
pub fn is_skip_statement(line: &str) -> bool {
    DEFAULT_CLASSIFIER.classify(line) == LineKind::SkipStatement
}
