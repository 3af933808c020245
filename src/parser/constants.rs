//! 解析器使用的常量定义
//!
//! 包括来源注解分隔符以及注释字段切分、数值识别用的预编译正则。

use memchr::memmem::Finder;
use once_cell::sync::Lazy;
use regex::Regex;

/// SQL 文本与来源注解之间的分隔符
pub static SOURCE_DELIMITER: &str = " -- ";

/// 预编译的分隔符查找器
pub static SOURCE_DELIMITER_FINDER: Lazy<Finder<'static>> =
    Lazy::new(|| Finder::new(SOURCE_DELIMITER.as_bytes()));

/// 注释行中的字段键：单词字符后跟 `": "`
pub static FIELD_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+: ").expect("valid field key pattern"));

/// 整数值：全部为数字
pub static INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid integer pattern"));

/// 十进制小数值：数字，可选的小数点及其后的数字
pub static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.?[0-9]*$").expect("valid decimal pattern"));
