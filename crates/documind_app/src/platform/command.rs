//! Line-oriented command language of the terminal front end.

use std::path::PathBuf;

use documind_core::{ActiveView, Department, ParseNameError};
use thiserror::Error;

pub const HELP: &str = "\
Documents   upload <path>... (quote paths with spaces)
            select|deselect|toggle <n|id>...
            delete <n|id>           open <n|id>
Actions     summarize  extract  compare  dismiss
Generate    generate <template|-> [docs=1,2] [description...]
Templates   templates [search]      preview <template>   use <template>
Chat        ask <text>              chat (show/hide panel)
Navigation  view <documents|templates|generate|analytics|info>
            dept <name>             close   ok (hide notification)
Other       export [path]           help    quit";

/// A document addressed by its 1-based row number or by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocRef {
    Index(usize),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(Vec<PathBuf>),
    Select(Vec<DocRef>),
    Deselect(Vec<DocRef>),
    Toggle(Vec<DocRef>),
    Delete(DocRef),
    Open(DocRef),
    Summarize,
    Extract,
    Compare,
    Generate {
        /// `None` uses the template picked from the library.
        template_id: Option<String>,
        documents: Vec<DocRef>,
        description: Option<String>,
    },
    DismissResult,
    Ask(String),
    ToggleChat,
    View(ActiveView),
    Department(Department),
    /// Opens the template library filtered by name.
    Templates(String),
    Preview(String),
    UseTemplate(String),
    Close,
    DismissNotification,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum CommandParseError {
    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),
    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("cannot split arguments: {0}")]
    Quoting(#[from] shell_words::ParseError),
    #[error("'{0}' is not a document number")]
    InvalidIndex(String),
    #[error(transparent)]
    Name(#[from] ParseNameError),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match word.to_ascii_lowercase().as_str() {
        "upload" => {
            let paths = shell_words::split(rest)?;
            if paths.is_empty() {
                return Err(CommandParseError::MissingArgument {
                    command: "upload",
                    what: "at least one path",
                });
            }
            Command::Upload(paths.into_iter().map(PathBuf::from).collect())
        }
        "select" => Command::Select(doc_refs(&args, "select")?),
        "deselect" => Command::Deselect(doc_refs(&args, "deselect")?),
        "toggle" => Command::Toggle(doc_refs(&args, "toggle")?),
        "delete" | "rm" => Command::Delete(single_doc(&args, "delete")?),
        "open" => Command::Open(single_doc(&args, "open")?),
        "summarize" | "summarise" => Command::Summarize,
        "extract" => Command::Extract,
        "compare" => Command::Compare,
        "generate" => parse_generate(&args)?,
        "dismiss" => Command::DismissResult,
        "ask" => {
            if rest.is_empty() {
                return Err(CommandParseError::MissingArgument {
                    command: "ask",
                    what: "a question",
                });
            }
            Command::Ask(rest.to_string())
        }
        "chat" => Command::ToggleChat,
        "view" => Command::View(first(&args, "view", "a view name")?.parse()?),
        "dept" | "department" => {
            Command::Department(first(&args, "dept", "a department")?.parse()?)
        }
        "templates" => Command::Templates(rest.to_string()),
        "preview" => Command::Preview(first(&args, "preview", "a template id")?.to_string()),
        "use" => Command::UseTemplate(first(&args, "use", "a template id")?.to_string()),
        "close" => Command::Close,
        "ok" => Command::DismissNotification,
        "export" => Command::Export(args.first().map(PathBuf::from)),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_generate(args: &[&str]) -> Result<Command, CommandParseError> {
    let (template, rest) = args.split_first().ok_or(CommandParseError::MissingArgument {
        command: "generate",
        what: "a template id or '-'",
    })?;
    let template_id = (*template != "-").then(|| template.to_string());

    let (documents, rest) = match rest.split_first() {
        Some((first, tail)) if first.starts_with("docs=") => {
            let list = first.trim_start_matches("docs=");
            let refs = list
                .split(',')
                .filter(|s| !s.is_empty())
                .map(parse_doc_ref)
                .collect::<Result<Vec<_>, _>>()?;
            (refs, tail)
        }
        _ => (Vec::new(), rest),
    };
    let description = (!rest.is_empty()).then(|| rest.join(" "));

    Ok(Command::Generate {
        template_id,
        documents,
        description,
    })
}

fn parse_doc_ref(token: &str) -> Result<DocRef, CommandParseError> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        match token.parse::<usize>() {
            Ok(n) if n > 0 => Ok(DocRef::Index(n)),
            _ => Err(CommandParseError::InvalidIndex(token.to_string())),
        }
    } else {
        Ok(DocRef::Id(token.to_string()))
    }
}

fn doc_refs(args: &[&str], command: &'static str) -> Result<Vec<DocRef>, CommandParseError> {
    non_empty(args, command, "a document number or id")?
        .iter()
        .map(|a| parse_doc_ref(a))
        .collect()
}

fn single_doc(args: &[&str], command: &'static str) -> Result<DocRef, CommandParseError> {
    parse_doc_ref(first(args, command, "a document number or id")?)
}

fn first<'a>(
    args: &[&'a str],
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandParseError> {
    args.first()
        .copied()
        .ok_or(CommandParseError::MissingArgument { command, what })
}

fn non_empty<'a, 'b>(
    args: &'b [&'a str],
    command: &'static str,
    what: &'static str,
) -> Result<&'b [&'a str], CommandParseError> {
    if args.is_empty() {
        Err(CommandParseError::MissingArgument { command, what })
    } else {
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> Command {
        parse_command(line).unwrap().unwrap()
    }

    #[test]
    fn blank_line_is_nothing() {
        assert!(matches!(parse_command("   "), Ok(None)));
    }

    #[test]
    fn document_references_accept_rows_and_ids() {
        assert_eq!(
            parse("select 1 3 1700000000000-2-a.pdf"),
            Command::Select(vec![
                DocRef::Index(1),
                DocRef::Index(3),
                DocRef::Id("1700000000000-2-a.pdf".into()),
            ])
        );
        assert!(matches!(
            parse_command("delete 0"),
            Err(CommandParseError::InvalidIndex(token)) if token == "0"
        ));
    }

    #[test]
    fn ask_keeps_the_full_question() {
        assert_eq!(
            parse("ask  What's the closing   date?"),
            Command::Ask("What's the closing   date?".into())
        );
        assert!(matches!(
            parse_command("ask"),
            Err(CommandParseError::MissingArgument { command: "ask", .. })
        ));
    }

    #[test]
    fn generate_with_docs_and_description() {
        assert_eq!(
            parse("generate re1 docs=2,1 Lease for unit 4B"),
            Command::Generate {
                template_id: Some("re1".into()),
                documents: vec![DocRef::Index(2), DocRef::Index(1)],
                description: Some("Lease for unit 4B".into()),
            }
        );
        assert_eq!(
            parse("generate -"),
            Command::Generate {
                template_id: None,
                documents: Vec::new(),
                description: None,
            }
        );
    }

    #[test]
    fn views_and_departments_parse_by_name() {
        assert_eq!(parse("view Analytics"), Command::View(ActiveView::Analytics));
        assert_eq!(parse("dept hr"), Command::Department(Department::Hr));
        assert!(matches!(
            parse_command("view inbox"),
            Err(CommandParseError::Name(_))
        ));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert!(matches!(
            parse_command("frobnicate now"),
            Err(CommandParseError::Unknown(word)) if word == "frobnicate"
        ));
    }

    #[test]
    fn export_path_is_optional() {
        assert_eq!(parse("export"), Command::Export(None));
        assert_eq!(
            parse("export out/report.json"),
            Command::Export(Some(PathBuf::from("out/report.json")))
        );
    }

    #[test]
    fn upload_accepts_quoted_paths_with_spaces() {
        assert_eq!(
            parse(r#"upload "My Contracts/lease 2024.pdf" notes.txt 'a b.doc'"#),
            Command::Upload(vec![
                PathBuf::from("My Contracts/lease 2024.pdf"),
                PathBuf::from("notes.txt"),
                PathBuf::from("a b.doc"),
            ])
        );
        assert!(matches!(
            parse_command(r#"upload "unterminated.pdf"#),
            Err(CommandParseError::Quoting(_))
        ));
        assert!(matches!(
            parse_command("upload"),
            Err(CommandParseError::MissingArgument { command: "upload", .. })
        ));
    }

    #[test]
    fn templates_takes_an_optional_search() {
        assert_eq!(parse("templates"), Command::Templates(String::new()));
        assert_eq!(
            parse("templates  purchase agreement"),
            Command::Templates("purchase agreement".into())
        );
    }
}
