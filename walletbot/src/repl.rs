//! Interactive chat loop.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::backend::ChatBackend;
use crate::error::Result;

/// 触发退出的关键字（忽略大小写）。
pub const EXIT_KEYWORDS: [&str; 3] = ["quit", "exit", "bye"];

const BANNER_TITLE: &str = "Crypto Wallet Assistant (type 'quit' to exit)";
const BANNER_SUBTITLE: &str = "Ask me anything about cryptocurrency and digital wallets!";
const FAREWELL: &str = "Goodbye!";
const RULE_WIDTH: usize = 50;

/// 单行输入的分类结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Exit,
    Empty,
    Message(&'a str),
}

/// 去除首尾空白后对输入分类。
#[must_use]
pub fn classify(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Input::Empty
    } else if EXIT_KEYWORDS
        .iter()
        .any(|keyword| trimmed.eq_ignore_ascii_case(keyword))
    {
        Input::Exit
    } else {
        Input::Message(trimmed)
    }
}

/// 循环结束的原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    ExitKeyword,
    EndOfInput,
}

/// 一次会话的统计。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplSummary {
    pub remote_calls: usize,
    pub replies: usize,
    pub errors: usize,
    pub termination: Termination,
}

/// 读取一行、转发给后端、打印回复或错误。
pub struct Repl<B, R, W> {
    backend: B,
    input: R,
    output: W,
}

impl<B, R, W> Repl<B, R, W>
where
    B: ChatBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(backend: B, input: R, output: W) -> Self {
        Self {
            backend,
            input,
            output,
        }
    }

    /// 运行直到收到退出关键字或输入结束。
    ///
    /// 远程调用失败只影响当前轮次；只有本地读写错误会中止循环。
    ///
    /// # Errors
    /// 当读取输入或写出失败时返回错误。
    pub async fn run(&mut self) -> Result<ReplSummary> {
        self.print_banner()?;

        let mut remote_calls = 0;
        let mut replies = 0;
        let mut errors = 0;
        let mut line = String::new();

        let termination = loop {
            write!(self.output, "\nYou: ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line).await? == 0 {
                writeln!(self.output)?;
                writeln!(self.output, "{FAREWELL}")?;
                break Termination::EndOfInput;
            }

            match classify(&line) {
                Input::Exit => {
                    writeln!(self.output, "{FAREWELL}")?;
                    break Termination::ExitKeyword;
                }
                Input::Empty => continue,
                Input::Message(text) => {
                    remote_calls += 1;
                    tracing::debug!(chars = text.len(), "sending chat turn");
                    match self.backend.send_message(text).await {
                        Ok(reply) => {
                            replies += 1;
                            writeln!(self.output, "\nBot: {reply}")?;
                        }
                        Err(err) => {
                            errors += 1;
                            tracing::debug!(error = %err, "chat turn failed");
                            writeln!(self.output, "\nError: {err}")?;
                        }
                    }
                }
            }
        };

        self.output.flush()?;
        Ok(ReplSummary {
            remote_calls,
            replies,
            errors,
            termination,
        })
    }

    /// 取回输出端（测试中用于检查打印内容）。
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_banner(&mut self) -> Result<()> {
        writeln!(self.output, "{BANNER_TITLE}")?;
        writeln!(self.output, "{BANNER_SUBTITLE}")?;
        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;
        Ok(())
    }
}
