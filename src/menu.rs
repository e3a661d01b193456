//! Interactive rename menu.
//!
//! ```text
//! Media Renamer
//!   1) Preview renames
//!   2) Rename files
//!   3) Exit
//! Choice:
//! ```
//!
//! Option 2 shows the preview first and only touches files after a `y`/`yes`
//! answer. End of input leaves the loop like option 3 does.
//!
//! The loop is generic over its input and output so tests can drive it with a
//! `Cursor` and inspect what was written.

use crate::config::GalleryConfig;
use crate::output;
use crate::rename::{self, RenamePlan, RenameReport};
use std::io::{BufRead, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Preview,
    Execute,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Preview),
            "2" => Some(Self::Execute),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// `y` or `yes` in any case confirms. Everything else cancels.
pub fn is_confirmation(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

/// Run the menu until the user exits or input ends.
pub fn run_menu<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    config: &GalleryConfig,
    root: &Path,
) -> Result<(), MenuError> {
    loop {
        writeln!(out)?;
        writeln!(out, "Media Renamer")?;
        writeln!(out, "  1) Preview renames")?;
        writeln!(out, "  2) Rename files")?;
        writeln!(out, "  3) Exit")?;
        write!(out, "Choice: ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(out)?;
            break;
        };

        match MenuChoice::parse(&line) {
            Some(MenuChoice::Preview) => {
                preview(out, config, root)?;
            }
            Some(MenuChoice::Execute) => {
                let Some(plans) = preview(out, config, root)? else {
                    continue;
                };
                write!(out, "Proceed with renaming? [y/N]: ")?;
                out.flush()?;
                let answer = read_line(input)?.unwrap_or_default();
                if is_confirmation(&answer) {
                    execute(out, &plans)?;
                } else {
                    writeln!(out, "Cancelled.")?;
                }
            }
            Some(MenuChoice::Exit) => break,
            None => {
                writeln!(out, "Invalid choice: {}", line.trim())?;
            }
        }
    }
    Ok(())
}

/// Print the plan for every section and hand it back, or `None` when
/// planning failed.
fn preview<W: Write>(
    out: &mut W,
    config: &GalleryConfig,
    root: &Path,
) -> Result<Option<Vec<RenamePlan>>, MenuError> {
    match rename::plan_sections(config, root, &[]) {
        Ok(plans) => {
            for plan in &plans {
                for line in output::format_rename_plan(plan) {
                    writeln!(out, "{}", line)?;
                }
            }
            Ok(Some(plans))
        }
        Err(err) => {
            writeln!(out, "Error: {}", err)?;
            Ok(None)
        }
    }
}

/// Carry out exactly the plans the user confirmed.
fn execute<W: Write>(out: &mut W, plans: &[RenamePlan]) -> Result<(), MenuError> {
    let reports: Vec<RenameReport> = plans.iter().map(rename::execute).collect();
    for report in &reports {
        for line in output::format_rename_report(report) {
            writeln!(out, "{}", line)?;
        }
    }
    for line in output::format_rename_summary(&reports) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Next line without its terminator, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
