//! Interactive line-oriented journal session.
//!
//! # Responsibility
//! - Draw the current screen, read one command, apply it to the journal.
//! - Ask on the terminal before a delete is applied.
//!
//! # Invariants
//! - End of input quits cleanly from any screen.
//! - Rejected actions are reported and the session keeps going.

use crate::render::{write_editor_header, write_list, write_menu, write_summary};
use anyhow::Result;
use devotion_core::view::list::ListScreen;
use devotion_core::view::EditorScreen;
use devotion_core::{render, DeleteOutcome, EntryStore, Journal, JournalError, Screen};
use log::debug;
use std::io::{BufRead, Write};

const MULTILINE_TERMINATOR: &str = ".";
/// Entered alone at a field prompt, empties the field.
const CLEAR_TOKEN: &str = "-";

enum Step {
    Continue,
    Quit,
}

pub struct Shell<S: EntryStore, R: BufRead, W: Write> {
    journal: Journal<S>,
    input: R,
    output: W,
}

impl<S: EntryStore, R: BufRead, W: Write> Shell<S, R, W> {
    pub fn new(journal: Journal<S>, input: R, output: W) -> Self {
        Self {
            journal,
            input,
            output,
        }
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let step = match render(&self.journal) {
                Screen::Menu(menu) => {
                    write_menu(&mut self.output, &menu)?;
                    self.menu_step()?
                }
                Screen::Editor(editor) => {
                    write_editor_header(&mut self.output, &editor)?;
                    self.editor_step(&editor)?
                }
                Screen::List(list) => {
                    write_list(&mut self.output, &list)?;
                    self.list_step(&list)?
                }
                Screen::Summary(summary) => {
                    write_summary(&mut self.output, &summary)?;
                    self.summary_step()?
                }
            };
            if let Step::Quit = step {
                debug!("event=shell_exit module=cli status=ok");
                return Ok(());
            }
        }
    }

    fn menu_step(&mut self) -> Result<Step> {
        let Some(choice) = self.prompt("> ")? else {
            return Ok(Step::Quit);
        };
        let result = match choice.trim() {
            "1" => self.journal.add_scripture(),
            "2" => self.journal.add_inspirational(),
            "3" => self.journal.view_list(),
            "q" | "Q" => return Ok(Step::Quit),
            other => {
                writeln!(self.output, "Unknown choice `{other}`.")?;
                return Ok(Step::Continue);
            }
        };
        self.report(result)?;
        Ok(Step::Continue)
    }

    fn editor_step(&mut self, editor: &EditorScreen) -> Result<Step> {
        for field in &editor.fields {
            let marker = if field.spec.required { " *" } else { "" };
            let label = format!("{}{marker} [{}]", field.spec.label, field.value);
            let value = if field.spec.is_multiline() {
                self.read_multiline(&label)?
            } else {
                self.prompt(&format!("{label}: "))?
            };
            let Some(mut value) = value else {
                return Ok(Step::Quit);
            };
            if value.trim() == CLEAR_TOKEN {
                value.clear();
            } else if value.is_empty() {
                continue;
            }
            let result = self.journal.set_field(field.spec.key, value);
            self.report(result)?;
        }

        loop {
            let Some(choice) = self.prompt(&format!("[s] {} / [c] Cancel: ", editor.submit_label))?
            else {
                return Ok(Step::Quit);
            };
            match choice.trim() {
                "s" | "S" => {
                    match self.journal.save() {
                        Ok(_) => writeln!(self.output, "Saved.")?,
                        Err(err) => writeln!(self.output, "Could not save: {err}")?,
                    }
                    return Ok(Step::Continue);
                }
                "c" | "C" => {
                    let result = self.journal.cancel();
                    self.report(result)?;
                    return Ok(Step::Continue);
                }
                _ => writeln!(self.output, "Type s to save or c to cancel.")?,
            }
        }
    }

    fn list_step(&mut self, list: &ListScreen) -> Result<Step> {
        let Some(line) =
            self.prompt("[v N] view  [e N] edit  [d N] delete  [b] back  [q] quit > ")?
        else {
            return Ok(Step::Quit);
        };
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let target = parts
            .next()
            .and_then(|raw| raw.parse::<usize>().ok())
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| list.rows().get(index))
            .map(|row| row.target.clone());

        match (command, target) {
            ("b" | "B", _) => {
                let result = self.journal.back();
                self.report(result)?;
            }
            ("q" | "Q", _) => return Ok(Step::Quit),
            ("v" | "V", Some(target)) => {
                if !self.journal.select(&target.id)? {
                    writeln!(self.output, "That entry no longer exists.")?;
                }
            }
            ("e" | "E", Some(target)) => {
                let result = self.journal.edit(&target);
                self.report(result)?;
            }
            ("d" | "D", Some(target)) => self.delete(&target.id)?,
            ("v" | "e" | "d" | "V" | "E" | "D", None) => {
                writeln!(self.output, "Pick an entry number from the list.")?;
            }
            _ => writeln!(self.output, "Unknown command `{}`.", line.trim())?,
        }
        Ok(Step::Continue)
    }

    fn summary_step(&mut self) -> Result<Step> {
        let Some(choice) = self.prompt("[e] edit  [b] back  [q] quit > ")? else {
            return Ok(Step::Quit);
        };
        let result = match choice.trim() {
            "e" | "E" => self.journal.edit_selected(),
            "b" | "B" => self.journal.back(),
            "q" | "Q" => return Ok(Step::Quit),
            other => {
                writeln!(self.output, "Unknown command `{other}`.")?;
                return Ok(Step::Continue);
            }
        };
        self.report(result)?;
        Ok(Step::Continue)
    }

    fn delete(&mut self, id: &devotion_core::EntryId) -> Result<()> {
        let Self {
            journal,
            input,
            output,
        } = self;
        let mut ask = |prompt: &str| -> bool {
            if write!(output, "{prompt} [y/N] ").and_then(|()| output.flush()).is_err() {
                return false;
            }
            matches!(
                read_line(&mut *input).ok().flatten().as_deref().map(str::trim),
                Some("y" | "Y" | "yes")
            )
        };
        let outcome = journal.delete(id, &mut ask)?;
        let message = match outcome {
            DeleteOutcome::Deleted => "Deleted.",
            DeleteOutcome::Declined => "Kept.",
            DeleteOutcome::NotFound => "That entry no longer exists.",
        };
        writeln!(output, "{message}")?;
        Ok(())
    }

    fn read_multiline(&mut self, label: &str) -> Result<Option<String>> {
        writeln!(self.output, "{label}:")?;
        let mut lines = Vec::new();
        loop {
            let Some(line) = read_line(&mut self.input)? else {
                if lines.is_empty() {
                    return Ok(None);
                }
                break;
            };
            if line == MULTILINE_TERMINATOR {
                break;
            }
            if lines.is_empty() && (line.is_empty() || line.trim() == CLEAR_TOKEN) {
                return Ok(Some(line));
            }
            lines.push(line);
        }
        Ok(Some(lines.join("\n")))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(read_line(&mut self.input)?)
    }

    /// Prints a rejected action; store failures end the session.
    fn report(&mut self, result: Result<(), JournalError>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(JournalError::Store(err)) => Err(err.into()),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                Ok(())
            }
        }
    }
}

fn read_line(input: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}
