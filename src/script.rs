//! Line-oriented command scripts for driving a session without a UI.
//!
//! One command per line. Blank lines and lines starting with `#` are skipped.
//! Defect, rectangle, image and category numbers are 1-based.

use std::path::PathBuf;

use crate::model::{Category, RectCoords};
use crate::session::{Presenter, SessionController};

/// Errors produced while parsing a script line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("{command}: expected {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("{command}: invalid argument '{value}'")]
    InvalidArgument { command: String, value: String },
}

/// Zoom direction for the `zoom` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomCommand {
    In,
    Out,
    Reset,
}

/// A single parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Source(PathBuf),
    Dest(PathBuf),
    Load,
    Image(usize),
    Next,
    Prev,
    Canvas(u32, u32),
    Add,
    Select(usize),
    Rect(usize),
    /// Rectangle in display coordinates, committed directly
    Draw(RectCoords),
    /// Rectangle in display coordinates, performed as a drag gesture
    Drag(RectCoords),
    DeleteRect,
    DeleteDefect,
    Rename(String),
    Category(Category),
    Result(String),
    Undo,
    Redo,
    Zoom(ZoomCommand),
    Save,
    SaveNext,
    Status,
}

impl Command {
    /// Parse one script line. Returns `Ok(None)` for blank and comment lines.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name {
            "source" => Command::Source(path_arg(name, rest)?),
            "dest" => Command::Dest(path_arg(name, rest)?),
            "load" => Command::Load,
            "image" => Command::Image(index_arg(name, rest)?),
            "next" => Command::Next,
            "prev" => Command::Prev,
            "canvas" => {
                let [w, h] = numbers::<u32, 2>(name, rest, "WIDTH HEIGHT")?;
                Command::Canvas(w, h)
            }
            "add" => Command::Add,
            "select" => Command::Select(index_arg(name, rest)?),
            "rect" => Command::Rect(index_arg(name, rest)?),
            "draw" => Command::Draw(rect_arg(name, rest)?),
            "drag" => Command::Drag(rect_arg(name, rest)?),
            "delete-rect" => Command::DeleteRect,
            "delete-defect" => Command::DeleteDefect,
            "rename" => Command::Rename(rest.to_string()),
            "category" => {
                let index = index_arg(name, rest)?;
                let category =
                    Category::from_index(index).ok_or_else(|| invalid(name, rest))?;
                Command::Category(category)
            }
            "result" => Command::Result(rest.to_string()),
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "zoom" => Command::Zoom(match rest {
                "in" => ZoomCommand::In,
                "out" => ZoomCommand::Out,
                "reset" => ZoomCommand::Reset,
                "" => return Err(missing(name, "in|out|reset")),
                _ => return Err(invalid(name, rest)),
            }),
            "save" => Command::Save,
            "save-next" => Command::SaveNext,
            "status" => Command::Status,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };
        Ok(Some(command))
    }

    /// Apply this command to a session. Returns what the session reported.
    pub fn apply<P: Presenter>(&self, session: &mut SessionController<P>) -> bool {
        match self {
            Command::Source(path) => session.set_source_folder(path),
            Command::Dest(path) => session.set_destination_folder(path),
            Command::Load => session.load_images(),
            Command::Image(index) => session.load_image(*index),
            Command::Next => session.next_image(),
            Command::Prev => session.prev_image(),
            Command::Canvas(w, h) => {
                session.resize_canvas(*w, *h);
                true
            }
            Command::Add => session.add_defect(),
            Command::Select(index) => session.select_defect(*index),
            Command::Rect(index) => session.select_rectangle(*index),
            Command::Draw(coords) => session.draw_rectangle(*coords),
            Command::Drag(coords) => {
                session.begin_draw(coords.x1, coords.y1)
                    && session.continue_draw(coords.x2, coords.y2).is_some()
                    && session.end_draw(coords.x2, coords.y2)
            }
            Command::DeleteRect => session.delete_selected_rectangle(),
            Command::DeleteDefect => session.delete_selected_defect(),
            Command::Rename(text) => session.rename_selected(text),
            Command::Category(category) => session.set_category(*category),
            Command::Result(text) => session.set_result_text(text),
            Command::Undo => session.undo(),
            Command::Redo => session.redo(),
            Command::Zoom(ZoomCommand::In) => {
                session.zoom_in();
                true
            }
            Command::Zoom(ZoomCommand::Out) => {
                session.zoom_out();
                true
            }
            Command::Zoom(ZoomCommand::Reset) => {
                session.reset_zoom();
                true
            }
            Command::Save => session.save().is_some(),
            Command::SaveNext => session.save_and_next(),
            Command::Status => {
                let status = session.status_line();
                session.presenter_mut().show_status(&status);
                true
            }
        }
    }
}

/// Run every line of a script, logging and skipping lines that don't parse.
///
/// Returns the number of commands that were applied.
pub fn run_script<P: Presenter>(session: &mut SessionController<P>, script: &str) -> usize {
    let mut applied = 0;
    for (number, line) in script.lines().enumerate() {
        match Command::parse(line) {
            Ok(Some(command)) => {
                let ok = command.apply(session);
                log::debug!("Line {}: {:?} -> {}", number + 1, command, ok);
                applied += 1;
            }
            Ok(None) => {}
            Err(e) => log::warn!("Line {}: {}", number + 1, e),
        }
    }
    applied
}

fn missing(command: &str, expected: &'static str) -> CommandError {
    CommandError::MissingArgument {
        command: command.to_string(),
        expected,
    }
}

fn invalid(command: &str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command: command.to_string(),
        value: value.to_string(),
    }
}

fn path_arg(command: &str, rest: &str) -> Result<PathBuf, CommandError> {
    if rest.is_empty() {
        return Err(missing(command, "a folder path"));
    }
    Ok(PathBuf::from(rest))
}

/// 1-based number converted to a 0-based index.
fn index_arg(command: &str, rest: &str) -> Result<usize, CommandError> {
    let [n] = numbers::<usize, 1>(command, rest, "a number")?;
    n.checked_sub(1).ok_or_else(|| invalid(command, rest))
}

fn rect_arg(command: &str, rest: &str) -> Result<RectCoords, CommandError> {
    let [x1, y1, x2, y2] = numbers::<i32, 4>(command, rest, "X1 Y1 X2 Y2")?;
    Ok(RectCoords::new(x1, y1, x2, y2))
}

fn numbers<T: std::str::FromStr + Copy + Default, const N: usize>(
    command: &str,
    rest: &str,
    expected: &'static str,
) -> Result<[T; N], CommandError> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() != N {
        return Err(missing(command, expected));
    }
    let mut values = [T::default(); N];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part.parse().map_err(|_| invalid(command, part))?;
    }
    Ok(values)
}
