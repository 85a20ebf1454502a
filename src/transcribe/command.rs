//! External-program transcriber.
//!
//! Protocol: the program gets every word on stdin, one per line, and prints one
//! pronunciation per line (space-separated phones) in the same order. The
//! dialect is passed through the environment:
//!
//! - `G2P_REGION`: `esp` or `latam`
//! - `G2P_DISTINCION`, `G2P_YEISMO`: `1` or `0`

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::Region;
use crate::error::AppError;
use crate::transcribe::Transcriber;

pub const COMMAND_ENV: &str = "G2P_COMMAND";

#[derive(Debug, Clone)]
pub struct CommandTranscriber {
    program: String,
    args: Vec<String>,
    region: Region,
}

impl CommandTranscriber {
    pub fn new(program: impl Into<String>, args: Vec<String>, region: Region) -> Self {
        Self {
            program: program.into(),
            args,
            region,
        }
    }

    /// Build from a whitespace-separated command line such as `python3 -m g2p_stdin`.
    pub fn from_command_line(command_line: &str, region: Region) -> Result<Self, AppError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| AppError::new(2, "Empty transcriber command."))?;
        Ok(Self::new(program, parts.collect(), region))
    }

    /// Read the command line from `G2P_COMMAND` (a `.env` file is honored).
    pub fn from_env(region: Region) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let command_line = std::env::var(COMMAND_ENV).map_err(|_| {
            AppError::new(
                2,
                format!("No transcriber configured: pass --g2p-command or set {COMMAND_ENV} (.env)."),
            )
        })?;
        Self::from_command_line(&command_line, region)
    }
}

impl Transcriber for CommandTranscriber {
    fn transcribe(&self, words: &[String]) -> Result<Vec<Vec<String>>, AppError> {
        debug!(program = %self.program, words = words.len(), region = self.region.code(), "running transcriber");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("G2P_REGION", self.region.code())
            .env("G2P_DISTINCION", flag(self.region.distincion()))
            .env("G2P_YEISMO", flag(self.region.yeismo()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| AppError::new(2, format!("Failed to start transcriber '{}': {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AppError::new(4, "Transcriber stdin unavailable."))?;
        let mut input = words.join("\n");
        input.push('\n');

        // Feed stdin from a separate thread so a chatty child can't deadlock on a full stdout pipe.
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| AppError::new(4, format!("Failed to wait for transcriber: {e}")))?;

        if !output.status.success() {
            return Err(AppError::new(
                4,
                format!("Transcriber '{}' failed with {}.", self.program, output.status),
            ));
        }

        writer
            .join()
            .map_err(|_| AppError::new(4, "Transcriber stdin writer panicked."))?
            .map_err(|e| AppError::new(4, format!("Failed to write words to transcriber: {e}")))?;

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| AppError::new(4, format!("Transcriber output is not UTF-8: {e}")))?;
        let prons: Vec<Vec<String>> = stdout
            .lines()
            .map(|line| line.split_whitespace().map(str::to_string).collect())
            .collect();

        if prons.len() != words.len() {
            return Err(AppError::new(
                4,
                format!(
                    "Transcriber printed {} lines for {} words.",
                    prons.len(),
                    words.len()
                ),
            ));
        }

        Ok(prons)
    }
}

fn flag(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str, region: Region) -> CommandTranscriber {
        CommandTranscriber::new("sh", vec!["-c".to_string(), script.to_string()], region)
    }

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn one_line_per_word_with_region_env() {
        let t = sh(r#"while read w; do echo "$G2P_REGION $G2P_DISTINCION$G2P_YEISMO $w"; done"#, Region::Esp);
        let out = t.transcribe(&words(&["casa", "sol"])).unwrap();
        assert_eq!(out[0], vec!["esp", "10", "casa"]);
        assert_eq!(out[1], vec!["esp", "10", "sol"]);
    }

    #[test]
    fn cat_echoes_words_as_single_phones() {
        let t = CommandTranscriber::from_command_line("cat", Region::Latam).unwrap();
        let out = t.transcribe(&words(&["a", "b"])).unwrap();
        assert_eq!(out, vec![vec!["a".to_string()], vec!["b".to_string()]]);
    }

    #[test]
    fn failing_program_is_an_error() {
        let t = sh("exit 3", Region::Latam);
        assert_eq!(t.transcribe(&words(&["casa"])).unwrap_err().exit_code(), 4);
    }

    #[test]
    fn short_output_is_an_error() {
        let t = sh("cat > /dev/null; echo K A", Region::Latam);
        let err = t.transcribe(&words(&["casa", "sol"])).unwrap_err();
        assert!(err.to_string().contains("1 lines for 2 words"));
    }

    #[test]
    fn empty_command_line_is_rejected() {
        assert!(CommandTranscriber::from_command_line("   ", Region::Esp).is_err());
    }
}
