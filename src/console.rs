//! Terminal prompts on stdin/stdout

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use tracing::debug;

use crate::error::Cancellation;
use crate::traits::Console;

const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// Outcome of parsing one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Parsed<T> {
    Value(T),
    Quit,
    /// Ask again after showing this hint.
    Retry(String),
}

fn is_quit(raw: &str) -> bool {
    QUIT_WORDS.iter().any(|w| raw.eq_ignore_ascii_case(w))
}

/// 1-based menu number to a 0-based index.
pub(crate) fn parse_choice(raw: &str, option_count: usize) -> Parsed<usize> {
    let raw = raw.trim();
    if is_quit(raw) {
        return Parsed::Quit;
    }
    match raw.parse::<usize>() {
        Ok(n) if (1..=option_count).contains(&n) => Parsed::Value(n - 1),
        Ok(_) => Parsed::Retry(format!(
            "Please enter a number between 1 and {}.",
            option_count
        )),
        Err(_) => Parsed::Retry("Invalid input. Enter the option number.".to_string()),
    }
}

pub(crate) fn parse_bounded_int(
    raw: &str,
    min: Option<i64>,
    max: Option<i64>,
    allow_unlimited: bool,
) -> Parsed<i64> {
    let raw = raw.trim();
    if is_quit(raw) {
        return Parsed::Quit;
    }
    let value = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(_) => return Parsed::Retry("Invalid integer. Try again.".to_string()),
    };
    if allow_unlimited && value == -1 {
        return Parsed::Value(value);
    }
    let below = min.is_some_and(|m| value < m);
    let above = max.is_some_and(|m| value > m);
    if below || above {
        let low = min.map_or("-inf".to_string(), |m| m.to_string());
        let high = max.map_or("inf".to_string(), |m| m.to_string());
        return Parsed::Retry(format!("Value must be between {} and {}.", low, high));
    }
    Parsed::Value(value)
}

/// `Console` backed by the process's stdin and stdout.
#[derive(Debug, Clone, Default)]
pub struct TerminalConsole {
    /// Echo `Selected: ...` after a menu choice.
    pub show_selection: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            show_selection: true,
        }
    }

    fn prompt(&self, prompt: &str) {
        print!("{}", prompt);
        let _ = io::stdout().flush();
    }

    /// Blocking stdin read moved off the runtime thread so Ctrl-C handling
    /// keeps running. End of input counts as an interrupt.
    async fn read_line(&self) -> Result<String, Cancellation> {
        let read = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).map(|n| (n, line))
        })
        .await;

        match read {
            Ok(Ok((0, _))) => {
                debug!("stdin closed");
                self.interrupted()
            }
            Ok(Ok((_, line))) => Ok(line),
            Ok(Err(e)) => {
                debug!("stdin read failed: {}", e);
                self.interrupted()
            }
            Err(e) => {
                debug!("stdin reader task failed: {}", e);
                self.interrupted()
            }
        }
    }

    fn interrupted<T>(&self) -> Result<T, Cancellation> {
        println!("\nInterrupted by user. Exiting.");
        Err(Cancellation::Interrupted)
    }

    fn quit<T>(&self) -> Result<T, Cancellation> {
        println!("Exiting.");
        Err(Cancellation::Quit)
    }
}

#[async_trait]
impl Console for TerminalConsole {
    async fn request_choice(
        &mut self,
        prompt: &str,
        options: &[&str],
    ) -> Result<usize, Cancellation> {
        loop {
            println!();
            for (idx, item) in options.iter().enumerate() {
                println!("[{}] {}", idx + 1, item);
            }
            println!();
            self.prompt(prompt);

            let line = self.read_line().await?;
            match parse_choice(&line, options.len()) {
                Parsed::Value(idx) => {
                    if self.show_selection {
                        println!("\nSelected: {}\n", options[idx]);
                    }
                    return Ok(idx);
                }
                Parsed::Quit => return self.quit(),
                Parsed::Retry(hint) => println!("{}", hint),
            }
        }
    }

    async fn request_bounded_int(
        &mut self,
        prompt: &str,
        min: Option<i64>,
        max: Option<i64>,
        allow_unlimited: bool,
    ) -> Result<i64, Cancellation> {
        loop {
            self.prompt(prompt);
            let line = self.read_line().await?;
            match parse_bounded_int(&line, min, max, allow_unlimited) {
                Parsed::Value(v) => return Ok(v),
                Parsed::Quit => return self.quit(),
                Parsed::Retry(hint) => println!("{}", hint),
            }
        }
    }

    async fn request_text(&mut self, prompt: &str) -> Result<String, Cancellation> {
        self.prompt(prompt);
        let line = self.read_line().await?;
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }
}
