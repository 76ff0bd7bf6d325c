use poster_tile::{Confirm, PosterSummary, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Prints the summary and asks on the terminal before any tile is cut
pub struct ConsolePrompt {
    assume_yes: bool,
}

impl ConsolePrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for ConsolePrompt {
    async fn confirm(&mut self, summary: &PosterSummary) -> Result<bool> {
        println!("{}", summary);
        if self.assume_yes {
            return Ok(true);
        }

        let mut stdout = tokio::io::stdout();
        stdout.write_all(b"Proceed? [y/N] ").await?;
        stdout.flush().await?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;
        Ok(parse_answer(&line))
    }
}

/// Only an explicit yes proceeds; anything else, including EOF, declines
pub fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
