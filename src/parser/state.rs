//! 解析状态机
//!
//! 状态与两个累积缓冲区都保存在 [`StateMachine`] 中，每输入一行推进一次。
//! 状态机只负责识别语句边界，记录的构造由 `parse_functions` 完成。

use std::mem;

use crate::tools::LineKind;

/// 解析器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// 初始状态：跳过第一条可识别语句之前的文件头
    #[default]
    Loading,
    /// 正在累积 SQL 行
    CollectingQuery,
    /// 正在累积语句之后的元数据注释行
    CollectingComment,
}

/// 一条语句在边界处被取出的缓冲内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingStatement {
    pub sql_lines: Vec<String>,
    pub comment_lines: Vec<String>,
}

impl PendingStatement {
    fn clear(&mut self) {
        self.sql_lines.clear();
        self.comment_lines.clear();
    }
}

/// 语句边界识别状态机
#[derive(Debug, Default)]
pub struct StateMachine {
    state: ParserState,
    pending: PendingStatement,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// 是否有尚未输出的 SQL 行
    pub fn has_pending(&self) -> bool {
        !self.pending.sql_lines.is_empty()
    }

    /// 输入一行，遇到语句边界且 SQL 缓冲非空时返回该语句
    pub fn feed(&mut self, line: String, kind: LineKind) -> Option<PendingStatement> {
        match self.state {
            ParserState::Loading => {
                if kind == LineKind::SkipStatement {
                    self.state = ParserState::CollectingComment;
                }
                None
            }
            ParserState::CollectingQuery => {
                match kind {
                    LineKind::CommentLine => {
                        self.state = ParserState::CollectingComment;
                        self.pending.comment_lines.push(line);
                    }
                    LineKind::SkipStatement => {}
                    LineKind::Other => self.pending.sql_lines.push(line),
                }
                None
            }
            ParserState::CollectingComment => {
                if kind == LineKind::CommentLine {
                    self.pending.comment_lines.push(line);
                    return None;
                }

                let completed = if self.has_pending() {
                    Some(mem::take(&mut self.pending))
                } else {
                    self.pending.clear();
                    None
                };

                self.state = ParserState::CollectingQuery;
                if kind == LineKind::Other {
                    self.pending.sql_lines.push(line);
                }
                completed
            }
        }
    }

    /// 输入结束时取出尚未输出的语句
    ///
    /// 只在启用 `flush_on_eof` 时调用；默认行为是丢弃。
    pub fn finish(&mut self) -> Option<PendingStatement> {
        if self.has_pending() {
            Some(mem::take(&mut self.pending))
        } else {
            self.pending.clear();
            None
        }
    }
}
