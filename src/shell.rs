//! Line-oriented terminal front-end
//!
//! Each input line becomes one [`Event`] for the controller; the view is
//! printed again after every command and banners are printed as they are
//! raised.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use anyhow::Result;

use s3_filemanager::api::{StorageApi, TransferKind, UploadFile};
use s3_filemanager::app::{App, Confirm};
use s3_filemanager::events::{Event, FormInput};
use s3_filemanager::notify::Banner;
use s3_filemanager::view::View;

const INPUT_POLL: Duration = Duration::from_millis(25);

const HELP: &str = "\
Commands:
  buckets              reload the bucket list
  open <bucket>        open a bucket at its root
  cd <folder>          enter a folder ('cd ..' goes up)
  up                   go up one level
  crumb <n>            jump to breadcrumb segment n (0 = bucket root)
  select <name>        select one entry
  add <name>           add/remove an entry from the selection
  copy | move          choose a destination for the selection
  to <bucket> [path]   submit the copy/move destination
  rm                   delete the selection
  mkdir | mb | rb      new folder / new bucket / delete bucket dialog
  name <text>          submit the open name dialog
  put <file>...        upload local files into the current folder
  close                close the dialog
  refresh              re-list the current folder
  quit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Show,
    Upload(Vec<PathBuf>),
    Dispatch(Event),
}

/// Parse one line; entry names are resolved against the rows of `view`
pub fn parse(line: &str, view: &View) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let event = match word {
        "" | "ls" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "put" => {
            if rest.is_empty() {
                return Err("usage: put <file>...".to_string());
            }
            return Ok(Command::Upload(rest.split_whitespace().map(PathBuf::from).collect()));
        }
        "buckets" => Event::LoadBuckets,
        "open" => Event::BucketClicked(required(rest, "open <bucket>")?.to_string()),
        "up" => Event::ParentActivated,
        "cd" => match required(rest, "cd <folder>")? {
            ".." => Event::ParentActivated,
            name => Event::EntryActivated(lookup(view, name)?),
        },
        "crumb" => {
            let index = required(rest, "crumb <n>")?
                .parse()
                .map_err(|_| format!("not a segment number: {}", rest))?;
            Event::CrumbClicked(index)
        }
        "select" | "add" => Event::EntryClicked {
            key: lookup(view, required(rest, "select <name>")?)?,
            additive: word == "add",
        },
        "copy" => Event::TransferRequested(TransferKind::Copy),
        "move" => Event::TransferRequested(TransferKind::Move),
        "to" => {
            let mut parts = rest.split_whitespace();
            let bucket = parts.next().ok_or("usage: to <bucket> [path]")?;
            Event::Submit(FormInput::Destination {
                bucket: bucket.to_string(),
                path: parts.next().unwrap_or_default().to_string(),
            })
        }
        "rm" => Event::DeleteSelectedRequested,
        "mkdir" => Event::NewFolderRequested,
        "mb" => Event::NewBucketRequested,
        "rb" => Event::DeleteBucketRequested,
        "name" => Event::Submit(FormInput::Name(rest.to_string())),
        "close" => Event::DialogClosed,
        "refresh" => Event::Refresh,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };

    Ok(Command::Dispatch(event))
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("usage: {}", usage))
    } else {
        Ok(arg)
    }
}

/// Key of the listed entry displayed as `name`
fn lookup(view: &View, name: &str) -> Result<String, String> {
    view.rows
        .iter()
        .filter(|row| !row.parent)
        .find(|row| row.name == name)
        .and_then(|row| row.key.clone())
        .ok_or_else(|| format!("no entry named '{}'", name))
}

/// Forward stdin lines from a dedicated thread.
///
/// Confirmation prompts read from the same receiver so the two never race
/// for input.
pub fn spawn_stdin_reader() -> Rc<Receiver<String>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    Rc::new(rx)
}

/// Blocking y/N prompt on the terminal; everything else waits for the answer
pub struct TerminalConfirm {
    lines: Rc<Receiver<String>>,
}

impl TerminalConfirm {
    pub fn new(lines: Rc<Receiver<String>>) -> Self {
        Self { lines }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        let _ = std::io::stdout().flush();

        match self.lines.recv() {
            Ok(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

fn print_banner(banner: &Banner) {
    let tag = if banner.success { "ok" } else { "error" };
    println!("[{} {}] {}", banner.raised_at.format("%H:%M:%S"), tag, banner.text);
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

async fn read_files<A: StorageApi + 'static>(app: &App<A>, paths: Vec<PathBuf>) -> Vec<UploadFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                app.notifier().error(format!("Not a file: {}", path.display()));
                continue;
            }
        };

        match tokio::fs::read(&path).await {
            Ok(data) => files.push(UploadFile::new(name, data)),
            Err(e) => app
                .notifier()
                .error(format!("Failed to read {}: {}", path.display(), e)),
        }
    }
    files
}

/// Run the interactive loop until `quit` or end of input.
///
/// Must be driven inside a `LocalSet`.
pub async fn run<A: StorageApi + 'static>(app: App<A>, lines: Rc<Receiver<String>>) -> Result<()> {
    let mut banners = app.notifier().subscribe();
    tokio::task::spawn_local(async move {
        while let Some(banner) = banners.recv().await {
            print_banner(&banner);
        }
    });

    app.startup().await;
    println!("{}", app.view());
    println!("Type 'help' for commands.");
    prompt();

    // Polled rather than awaited: TerminalConfirm needs a synchronous recv on
    // the same channel, and tokio's blocking_recv panics inside the runtime.
    loop {
        let line = match lines.try_recv() {
            Ok(line) => line,
            Err(TryRecvError::Empty) => {
                tokio::time::sleep(INPUT_POLL).await;
                continue;
            }
            Err(TryRecvError::Disconnected) => break,
        };

        let event = match parse(&line, &app.view()) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                println!("{}", HELP);
                prompt();
                continue;
            }
            Ok(Command::Show) => None,
            Ok(Command::Upload(paths)) => {
                let files = read_files(&app, paths).await;
                (!files.is_empty()).then_some(Event::UploadRequested(files))
            }
            Ok(Command::Dispatch(event)) => Some(event),
            Err(msg) => {
                println!("{}", msg);
                prompt();
                continue;
            }
        };

        if let Some(event) = event {
            if let Some(batch) = app.dispatch(event).await {
                tokio::task::spawn_local(async move {
                    batch.wait().await;
                });
            }
        }

        println!("{}", app.view());
        prompt();
    }

    tracing::info!("Shutting down");
    Ok(())
}
