//! The interactive REPL.
//!
//! Every input that is not a `:command` is a card text. A trailing `\`
//! continues the text on the next line; the lines are kept apart, so
//! line-sensitive cases see them as written.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use minilex_foundation::{Error, ErrorKind, Export, Result};
use minilex_parser::{CardText, SymbolTree};
use minilex_sequence::{ExpansionPolicy, SymbolSequence};

use crate::config::RuntimeConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::serialize;
use crate::session::Session;

/// What an input produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Text to print; may be empty.
    Text(String),
    /// The user asked to leave.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
    show_banner: bool,
    prompt: String,
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL for `config` with the rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor or the grammar fails to initialize.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let editor = RustylineEditor::new(config.history_size)?;
        Ok(Self::with_editor(editor, Session::new(config)?))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL over the given editor and session.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "minilex> ".to_string(),
            continuation_prompt: "      .. ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop until EOF or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(lines) = self.read_input()? else {
            return Ok(false);
        };
        if lines.iter().all(|line| line.trim().is_empty()) {
            return Ok(true);
        }

        self.editor.add_history(&lines.join("\\\n"));

        match self.eval_lines(lines) {
            Ok(Reply::Quit) => return Ok(false),
            Ok(Reply::Text(text)) if !text.is_empty() => println!("{text}"),
            Ok(Reply::Text(_)) => {}
            Err(e) => print_error(&e),
        }
        Ok(true)
    }

    /// Reads one input, following trailing-backslash continuations.
    fn read_input(&mut self) -> Result<Option<Vec<String>>> {
        let mut lines = Vec::new();

        loop {
            let result = if lines.is_empty() {
                self.editor.read_line(&self.prompt)?
            } else {
                self.editor.read_continuation(&self.continuation_prompt)?
            };

            match result {
                ReadResult::Line(input) => {
                    let mut open = false;
                    // rustyline hands over continued input in one piece.
                    for part in input.split('\n') {
                        let trimmed = part.trim_end();
                        open = trimmed.ends_with('\\');
                        lines.push(trimmed.trim_end_matches('\\').trim_end().to_string());
                    }
                    if !open {
                        return Ok(Some(lines));
                    }
                }
                ReadResult::Interrupted => {
                    if !lines.is_empty() {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(Vec::new()));
                }
                ReadResult::Eof => {
                    if lines.is_empty() {
                        return Ok(None);
                    }
                    return Err(Error::new(ErrorKind::Io(
                        "unexpected EOF in continued input".to_string(),
                    )));
                }
            }
        }
    }

    /// Evaluates a single-line input.
    ///
    /// # Errors
    ///
    /// Returns any error from the command or from processing the text.
    pub fn eval(&mut self, input: &str) -> Result<Reply> {
        self.eval_lines(vec![input.to_string()])
    }

    /// Processes a file as one card text, one text line per file line,
    /// and returns the rendered output.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or processing fails.
    pub fn eval_file(&mut self, path: &Path) -> Result<String> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to read file '{}': {e}",
                path.display()
            )))
        })?;
        let lines: Vec<String> = contents.lines().map(str::to_string).collect();
        let (tree, sequence) = self.session.process(lines)?;
        Ok(self.render(&tree, &sequence))
    }

    fn eval_lines(&mut self, lines: Vec<String>) -> Result<Reply> {
        if let [line] = lines.as_slice() {
            let line = line.trim();
            if let Some(command) = line.strip_prefix(':') {
                return self.command(command);
            }
        }

        let text = match <[String; 1]>::try_from(lines) {
            Ok([line]) => CardText::from(line),
            Err(lines) => CardText::from(lines),
        };
        let (tree, sequence) = self.session.process(text)?;
        Ok(Reply::Text(self.render(&tree, &sequence)))
    }

    fn command(&mut self, command: &str) -> Result<Reply> {
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(n, a)| (n, a.trim()));

        let text = match name {
            "quit" | "q" => return Ok(Reply::Quit),
            "help" | "h" => help_text(),
            "source" => {
                if arg.is_empty() {
                    format!("source: {}", self.session.config().source)
                } else {
                    self.session.set_source(arg);
                    format!("source set to {arg}")
                }
            }
            "extract" => {
                let tags = parse_tags(arg);
                let reply = if tags.is_empty() {
                    "extraction off".to_string()
                } else {
                    format!("extracting {}", tags.join(", "))
                };
                self.session.set_extraction_tags(tags)?;
                reply
            }
            "collapse-tags" => {
                let tags = parse_tags(arg);
                let reply = format!("collapse tags: {}", tags.join(", "));
                self.session.set_collapse_tags(tags)?;
                reply
            }
            "collapse" => {
                self.session.set_policy(ExpansionPolicy::Collapse);
                "condition markers off".to_string()
            }
            "expand" => {
                self.session.set_policy(ExpansionPolicy::Expand);
                "condition markers on".to_string()
            }
            "tree" => {
                let show = !self.session.config().show_tree;
                self.session.set_show_tree(show);
                format!("tree display {}", on_off(show))
            }
            "export" => {
                let show = !self.session.config().show_export;
                self.session.set_show_export(show);
                format!("export display {}", on_off(show))
            }
            "save" => {
                let path = required_path(name, arg)?;
                let archive = self.session.archive();
                serialize::save_to_file(&archive, path)?;
                format!("saved {} entries to {path}", archive.entries.len())
            }
            "load" => {
                let path = required_path(name, arg)?;
                let archive = serialize::load_from_file(path)?;
                let mut out = format!("{} entries in {path}", archive.entries.len());
                for (i, entry) in archive.entries.iter().enumerate() {
                    out.push_str(&format!(
                        "\n[{i}] {}: {}\n    {}",
                        entry.source,
                        entry.text.join(" / "),
                        entry.sequence
                    ));
                }
                out
            }
            other => {
                return Err(Error::new(ErrorKind::UnrecognizedInput(format!(
                    ":{other} (try :help)"
                ))));
            }
        };
        Ok(Reply::Text(text))
    }

    fn render(&self, tree: &SymbolTree, sequence: &SymbolSequence) -> String {
        let config = self.session.config();
        let mut out = String::new();
        if config.show_tree {
            out.push_str(&format!("tree: {tree}\n"));
        }
        if config.show_export {
            out.push_str(&sequence.export().to_string());
        } else if sequence.is_empty() {
            out.push_str("(empty)");
        } else {
            out.push_str(sequence.to_string().trim_end());
        }
        out
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mminilex\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type card text to flatten it, :help for commands, Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
    if let Some(context) = &error.context {
        eprintln!("\x1b[2m{context}\x1b[0m");
    }
}

fn parse_tags(arg: &str) -> Vec<String> {
    arg.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tag| !tag.is_empty())
        .map(str::to_uppercase)
        .collect()
}

fn required_path<'a>(command: &str, arg: &'a str) -> Result<&'a str> {
    if arg.is_empty() {
        Err(Error::new(ErrorKind::UnrecognizedInput(format!(
            ":{command} needs a path"
        ))))
    } else {
        Ok(arg)
    }
}

const fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

fn help_text() -> String {
    [
        "Commands:",
        "  :source [NAME]        show or set the source tag",
        "  :extract [TAGS]       extract nodes with these tags; no tags turns it off",
        "  :collapse-tags TAGS   strip results from these extracted tags",
        "  :collapse             drop condition markers",
        "  :expand               keep condition markers",
        "  :tree                 toggle printing the symbol tree",
        "  :export               toggle printing the export instead of lines",
        "  :save PATH            save processed inputs as MessagePack",
        "  :load PATH            list the entries of a saved archive",
        "  :help                 show this help",
        "  :quit                 leave",
        "End a line with \\ to continue the card text on the next line.",
    ]
    .join("\n")
}
