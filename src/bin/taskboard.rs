use anyhow::{bail, Context};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use taskboard_core::{
    Board, BoardConfig, CardDrag, DataTransfer, ProjectId, ProjectStatus, TextCardRenderer,
};

/// Console front end for the project board
#[derive(Debug, Parser)]
#[command(name = "taskboard", version)]
struct Cli {
    /// JSON board configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `taskboard_core=debug`
    #[arg(long, default_value = "warn")]
    log_level: String,
}

const HELP: &str = "\
commands:
  add <title> | <description> | <people>
  move <id> <status>  move a project without dragging
  drag <id>           start dragging a card (id prefix is enough)
  over <status>       drag over a column
  leave <status>      drag out of a column
  drop <status>       release over a column
  cancel              release outside any column
  show                print every column
  json                print the store snapshot as JSON
  help | quit";

struct Session {
    board: Board<TextCardRenderer>,
    drag: Option<(CardDrag, DataTransfer)>,
}

impl Session {
    fn resolve(&self, prefix: &str) -> anyhow::Result<ProjectId> {
        if let Ok(id) = ProjectId::from_str(prefix) {
            return Ok(id);
        }
        let matches: Vec<ProjectId> = self
            .board
            .store()
            .snapshot()
            .iter()
            .map(|p| p.id)
            .filter(|id| id.to_string().starts_with(prefix))
            .collect();
        match matches.as_slice() {
            [id] => Ok(*id),
            [] => bail!("no project matches {:?}", prefix),
            _ => bail!("{:?} is ambiguous", prefix),
        }
    }

    fn show(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "== {} ==", self.board.config().name)?;
        for column in self.board.columns() {
            writeln!(out, "-- {} ({}) --", column.title(), column.len())?;
            for card in column.cards() {
                writeln!(out, "{}", card)?;
            }
        }
        Ok(())
    }

    fn execute(&mut self, line: &str, out: &mut impl Write) -> anyhow::Result<bool> {
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => {}
            "add" => {
                let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
                let [title, description, people] = fields.as_slice() else {
                    bail!("usage: add <title> | <description> | <people>");
                };
                self.board.form_mut().fill(*title, *description, *people);
                let id = self.board.form_mut().submit()?;
                writeln!(out, "added {}", id)?;
            }
            "move" => {
                let (prefix, status) = rest
                    .split_once(' ')
                    .context("usage: move <id> <status>")?;
                let id = self.resolve(prefix.trim())?;
                let status = ProjectStatus::from_str(status)?;
                if self.board.store().move_project(&id, status) {
                    writeln!(out, "moved {} to {}", id, status)?;
                } else {
                    writeln!(out, "{} unchanged", id)?;
                }
            }
            "drag" => {
                let id = self.resolve(rest)?;
                let picked = self
                    .board
                    .pick_up(&id)
                    .with_context(|| format!("project {} is not on the board", id))?;
                self.drag = Some(picked);
                writeln!(out, "dragging {}", id)?;
            }
            "over" | "leave" | "drop" => {
                let status = ProjectStatus::from_str(rest)?;
                let Some((drag, transfer)) = self.drag.as_mut() else {
                    bail!("nothing is being dragged");
                };
                let column = self
                    .board
                    .column(status)
                    .with_context(|| format!("no {} column", status))?;
                match command {
                    "over" => {
                        let verdict = column.drag_over(transfer);
                        writeln!(out, "{}: {:?}", column.title(), verdict)?;
                    }
                    "leave" => column.drag_leave(),
                    _ => {
                        let accepted = self.board.release(drag, transfer, status);
                        self.drag = None;
                        let outcome = if accepted { "accepted" } else { "rejected" };
                        writeln!(out, "drop {}", outcome)?;
                        self.show(out)?;
                    }
                }
            }
            "cancel" => match self.drag.take() {
                Some((mut drag, _)) => {
                    for column in self.board.columns() {
                        column.drag_leave();
                    }
                    writeln!(out, "drag {:?}", drag.end(false))?;
                }
                None => bail!("nothing is being dragged"),
            },
            "show" => self.show(out)?,
            "json" => writeln!(out, "{}", self.board.store().to_json()?)?,
            "help" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" => return Ok(false),
            other => bail!("unknown command {:?}, try `help`", other),
        }
        Ok(true)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let config = match &cli.config {
        Some(path) => BoardConfig::load(path)
            .with_context(|| format!("loading board config from {}", path.display()))?,
        None => BoardConfig::default(),
    };

    let mut session = Session {
        board: Board::new(config, TextCardRenderer)?,
        drag: None,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", HELP)?;

    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        match session.execute(line.trim(), &mut stdout) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => writeln!(stdout, "error: {:#}", err)?,
        }
        stdout.flush()?;
    }

    Ok(())
}
