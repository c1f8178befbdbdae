use std::io::{BufRead, Write};

use crate::errors::CliError;

/// Line-based question and answer over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` on its own line and read one trimmed answer.
    /// End of input is reported against `parameter`.
    pub fn ask(&mut self, question: &str, parameter: &'static str) -> Result<String, CliError> {
        let io_err = |e: std::io::Error| CliError::Io {
            reason: e.to_string(),
        };
        writeln!(self.output, "{question} ").map_err(io_err)?;
        self.output.flush().map_err(io_err)?;

        let mut line = String::new();
        if self.input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(CliError::MissingInput { parameter });
        }
        Ok(line.trim().to_string())
    }

    pub fn ask_f64(&mut self, question: &str, parameter: &'static str) -> Result<f64, CliError> {
        let answer = self.ask(question, parameter)?;
        answer
            .parse()
            .map_err(|_| CliError::InvalidInput {
                parameter,
                value: answer,
            })
    }

    /// Only an exact `y` counts as yes.
    pub fn ask_yes_no(&mut self, question: &str, parameter: &'static str) -> Result<bool, CliError> {
        Ok(self.ask(question, parameter)? == "y")
    }
}
