use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

const PROMPT: &str = "aish> ";

/// Interactive line reader for the prompt loop.
///
/// Wraps a rustyline editor with in-session history. History is not persisted
/// across runs.
pub struct Prompt {
    editor: DefaultEditor,
}

impl Prompt {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Read one line from the user.
    ///
    /// Returns `None` when the session should end: Ctrl-C, Ctrl-D, or a
    /// reader error.
    pub fn read_line(&mut self) -> Option<String> {
        match self.editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Some(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(error) => {
                eprintln!("prompt error: {error}");
                None
            }
        }
    }
}
