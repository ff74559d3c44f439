use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    NotesOnly,
    NotesAndExport,
    ExportOnly,
}

impl RunMode {
    pub fn makes_notes(self) -> bool {
        matches!(self, RunMode::NotesOnly | RunMode::NotesAndExport)
    }

    pub fn makes_csvs(self) -> bool {
        matches!(self, RunMode::NotesAndExport | RunMode::ExportOnly)
    }

    fn describe(self) -> &'static str {
        match self {
            RunMode::NotesOnly => "Generating only notes",
            RunMode::NotesAndExport => "Generating notes and CSV files",
            RunMode::ExportOnly => "Generating only CSV files",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub mode: RunMode,
    pub translations: bool,
}

fn ask_yes_no(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> io::Result<bool> {
    loop {
        writeln!(output, "{prompt} (Y/N)")?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        match line.trim().to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => writeln!(output, "Please enter Y or N.")?,
        }
    }
}

/// Interactive mode selection: CSVs or not, CSV-only or not, translations
/// or not, then a final confirmation that loops back on refusal.
pub fn select_plan(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<RunPlan> {
    loop {
        let mode = if ask_yes_no(input, output, "Generate CSV files for Anki?")? {
            if ask_yes_no(input, output, "Generate only CSV files (no new notes)?")? {
                RunMode::ExportOnly
            } else {
                RunMode::NotesAndExport
            }
        } else {
            RunMode::NotesOnly
        };

        let translations = if mode.makes_notes() {
            ask_yes_no(input, output, "Include sentence translations?")?
        } else {
            false
        };

        writeln!(output, "{}", mode.describe())?;
        if ask_yes_no(input, output, "Confirm")? {
            return Ok(RunPlan { mode, translations });
        }
        writeln!(output, "Restarting...")?;
    }
}
