use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub enum LineReadStatus {
    Line(String),
    Done,
}

pub struct LineReader {
    editor: DefaultEditor,
    history_file: String,
    prompt: String,
}

impl LineReader {
    pub fn new(history_file: &str, prompt: &str) -> rustyline::Result<Self> {
        let mut editor = DefaultEditor::new()?;
        // Missing history on a first run is fine.
        let _ = editor.load_history(history_file);
        Ok(Self {
            editor,
            history_file: history_file.to_string(),
            prompt: prompt.to_string(),
        })
    }

    pub fn readline(&mut self) -> LineReadStatus {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                LineReadStatus::Line(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => LineReadStatus::Done,
            Err(_) => LineReadStatus::Done,
        }
    }
}

impl Drop for LineReader {
    fn drop(&mut self) {
        let _ = self.editor.save_history(&self.history_file);
    }
}
