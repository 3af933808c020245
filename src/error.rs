//! 错误类型定义
//!
//! 定义了读取和解析慢查询日志过程中可能出现的所有错误类型。

use thiserror::Error;

/// 解析错误类型
///
/// 注意：格式不规范的注释行、无法识别类型的字段值都不是错误，
/// 它们会被静默忽略或退化为字符串。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// 文件未找到
    #[error("file not found: {path}")]
    FileNotFound {
        /// 文件路径
        path: String,
    },

    /// 打开或读取文件时的 I/O 错误
    #[error("io error: {0}")]
    IoError(String),

    /// 来源过滤使用的正则表达式无效
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// 原始模式
        pattern: String,
        /// 正则编译器给出的原因
        reason: String,
    },

    /// 解析器配置无效
    #[error("invalid parser config: {0}")]
    InvalidConfig(String),
}

impl ParseError {
    /// 是否为文件不存在错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, ParseError::FileNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParseError::FileNotFound {
            path: "/tmp/missing.log".to_string(),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.log");
        assert!(err.is_not_found());

        let err = ParseError::InvalidPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert!(err.to_string().contains("invalid pattern '('"));
        assert!(!err.is_not_found());
    }
}
