//! Terminal implementation of [`ProfilePrompter`].

use std::io::{BufRead, Write};

use resumekit_core::profile::ProfilePrompter;
use resumekit_shared::{ResumeKitError, Result};

/// Asks on stderr and reads answers line by line.
pub(crate) struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<std::io::StdinLock<'static>, std::io::Stderr> {
    pub(crate) fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ProfilePrompter for TerminalPrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")
            .and_then(|()| self.output.flush())
            .map_err(|e| ResumeKitError::Prompt(format!("cannot write prompt: {e}")))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| ResumeKitError::Prompt(format!("cannot read answer: {e}")))?;
        if read == 0 {
            return Err(ResumeKitError::Prompt(
                "input closed before the profile was complete".into(),
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, message: &str) {
        // Best effort: a closed stderr must not abort profile collection.
        let _ = writeln!(self.output, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_one_line_per_question() {
        let input: &[u8] = b"Ada\r\nLovelace\n";
        let mut out = Vec::new();
        let mut prompter = TerminalPrompter::new(input, &mut out);

        assert_eq!(prompter.ask("First name: ").unwrap(), "Ada");
        assert_eq!(prompter.ask("Last name: ").unwrap(), "Lovelace");
        prompter.say("done");

        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown, "First name: Last name: done\n");
    }

    #[test]
    fn end_of_input_is_a_prompt_error() {
        let input: &[u8] = b"";
        let mut prompter = TerminalPrompter::new(input, Vec::new());
        let err = prompter.ask("Email address: ").unwrap_err();
        assert!(matches!(err, ResumeKitError::Prompt(_)));
    }
}
