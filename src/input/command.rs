//! Console command parsing

use std::path::PathBuf;

use thiserror::Error;

use scribe::theme::ThemeMode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try help)")]
    Unknown(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zoom {
    In,
    Out,
}

/// Inclusive 1-indexed line span, written `n` or `n-m`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub first: usize,
    pub last: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Open(PathBuf),
    Save,
    SaveAs(PathBuf),
    Close { force: bool },
    /// 1-indexed tab number
    Tab(usize),
    Next,
    Prev,
    Tabs,
    Show,
    Append(String),
    Find(String),
    Replace { find: String, with: String },
    Goto(usize),
    Undo,
    Redo,
    Select(LineSpan),
    SelectAll,
    Copy,
    Cut,
    Paste,
    Zoom(Zoom),
    Theme(ThemeMode),
    Lines,
    Info,
    Help,
    Quit { force: bool },
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let required = |what: &'static str| {
            if arg.is_empty() {
                Err(CommandError::MissingArgument(what))
            } else {
                Ok(arg)
            }
        };

        match name {
            "new" => Ok(Command::New),
            "open" | "o" => Ok(Command::Open(PathBuf::from(required("open")?))),
            "save" | "w" => Ok(Command::Save),
            "saveas" => Ok(Command::SaveAs(PathBuf::from(required("saveas")?))),
            "close" => Ok(Command::Close { force: false }),
            "close!" => Ok(Command::Close { force: true }),
            "tab" => Ok(Command::Tab(Self::number(required("tab")?)?)),
            "next" => Ok(Command::Next),
            "prev" => Ok(Command::Prev),
            "tabs" => Ok(Command::Tabs),
            "show" => Ok(Command::Show),
            "append" | "a" => Ok(Command::Append(arg.to_string())),
            "find" | "f" => Ok(Command::Find(required("find")?.to_string())),
            "replace" | "r" => Self::replace(required("replace")?),
            "goto" | "g" => Ok(Command::Goto(Self::number(required("goto")?)?)),
            "undo" | "u" => Ok(Command::Undo),
            "redo" => Ok(Command::Redo),
            "select" | "s" => Ok(Command::Select(Self::span(required("select")?)?)),
            "selectall" => Ok(Command::SelectAll),
            "copy" | "y" => Ok(Command::Copy),
            "cut" | "x" => Ok(Command::Cut),
            "paste" | "p" => Ok(Command::Paste),
            "zoom" => match required("zoom")? {
                "in" | "+" => Ok(Command::Zoom(Zoom::In)),
                "out" | "-" => Ok(Command::Zoom(Zoom::Out)),
                other => Err(CommandError::InvalidArgument(other.to_string())),
            },
            "theme" => required("theme")?
                .parse()
                .map(Command::Theme)
                .map_err(CommandError::InvalidArgument),
            "lines" => Ok(Command::Lines),
            "info" => Ok(Command::Info),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit { force: false }),
            "quit!" | "q!" => Ok(Command::Quit { force: true }),
            "" => Err(CommandError::MissingArgument("a command")),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    fn number(arg: &str) -> Result<usize, CommandError> {
        arg.parse()
            .map_err(|_| CommandError::InvalidArgument(format!("not a line or tab number: {arg}")))
    }

    fn span(arg: &str) -> Result<LineSpan, CommandError> {
        let (first, last) = match arg.split_once('-') {
            Some((first, last)) => (Self::number(first.trim())?, Self::number(last.trim())?),
            None => {
                let line = Self::number(arg)?;
                (line, line)
            }
        };
        if first > last {
            return Err(CommandError::InvalidArgument(format!("backwards line span: {arg}")));
        }
        Ok(LineSpan { first, last })
    }

    /// `/find/with/`, where the first character picks the delimiter
    fn replace(arg: &str) -> Result<Command, CommandError> {
        let mut chars = arg.chars();
        let delim = chars.next().ok_or(CommandError::MissingArgument("replace"))?;
        let rest = chars.as_str();
        let rest = rest.strip_suffix(delim).unwrap_or(rest);

        let (find, with) = rest.split_once(delim).ok_or_else(|| {
            CommandError::InvalidArgument(format!("expected {delim}find{delim}with{delim}"))
        })?;
        if find.is_empty() {
            return Err(CommandError::InvalidArgument("nothing to find".to_string()));
        }

        Ok(Command::Replace {
            find: find.to_string(),
            with: with.to_string(),
        })
    }
}

pub const HELP: &str = "\
new | open <path> | save | saveas <path> | close[!]
tab <n> | next | prev | tabs | show
append <text> | undo | redo
select <n>[-<m>] | selectall | copy | cut | paste
find <text> | replace /find/with/ | goto <line>
zoom in|out | theme light|dark|auto | lines | info | quit[!]";
