//! # Confirmation Prompts
//!
//! File: cli/src/common/ui/prompts.rs
//!
//! `confirm` asks a yes/no question on `output` and reads one line from
//! `input`. Answers are matched case-insensitively after trimming:
//! `y`, `ye` and `yes` confirm; `n` and `no` decline. An empty line, end of
//! input or any other answer also declines. There is no re-prompt.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::debug;

const AFFIRMATIVE: &[&str] = &["y", "ye", "yes"];
const NEGATIVE: &[&str] = &["n", "no"];

/// Asks `question` and returns whether the user confirmed.
pub fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush().context("Failed to flush prompt")?;

    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .context("Failed to read answer from input")?;
    if read == 0 {
        writeln!(output)?;
        debug!("No answer received (end of input); treating as no.");
        return Ok(false);
    }

    let answer = answer.trim().to_lowercase();
    if AFFIRMATIVE.contains(&answer.as_str()) {
        Ok(true)
    } else {
        if !NEGATIVE.contains(&answer.as_str()) {
            debug!("Unrecognized answer '{}'; treating as no.", answer);
        }
        Ok(false)
    }
}
