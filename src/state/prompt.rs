// Fetch confirmation prompts.
// Decides whether the pager may fetch an uncached page.

use std::io::{BufRead, Write};

use crate::error::Result;

/// Outcome of asking whether to fetch a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Cancel,
}

/// Asked before every network fetch of a post page.
pub trait Prompt {
    fn confirm(&mut self, category: &str, page: u32) -> Result<Decision>;
}

/// Never asks; used for non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysProceed;

impl Prompt for AlwaysProceed {
    fn confirm(&mut self, _category: &str, _page: u32) -> Result<Decision> {
        Ok(Decision::Proceed)
    }
}

/// Blocks on a line of input. Enter proceeds; `q` or end of input cancels.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on the terminal: read stdin, write to stderr.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn confirm(&mut self, category: &str, page: u32) -> Result<Decision> {
        let label = if category.is_empty() { "/" } else { category };
        write!(
            self.output,
            "press enter to fetch page {} of '{}' (q to stop) ",
            page, label
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Decision::Cancel);
        }

        match line.trim() {
            "q" | "Q" => Ok(Decision::Cancel),
            _ => Ok(Decision::Proceed),
        }
    }
}
