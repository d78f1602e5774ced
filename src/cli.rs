//! Terminal front-end — parses REPL lines into wizard commands and applies
//! them to a controller.

use std::pin::Pin;

use futures::{Stream, StreamExt, stream};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::WizardError;
use crate::profile::{GOAL_OPTIONS, ProfileField};
use crate::render;
use crate::wizard::{Action, WizardController};

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Set { field: ProfileField, value: String },
    Goal(String),
    Goals,
    Submit,
    Assess,
    Plan,
    /// Whatever moves the current screen forward.
    Next,
    Restart,
    Dismiss,
    Show,
    Server,
    Help,
    Quit,
    Invalid(String),
}

/// Parses user input into commands.
pub struct CommandParser;

impl CommandParser {
    pub fn parse(line: &str) -> Command {
        let trimmed = line.trim();
        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None => (trimmed, ""),
        };

        match head.to_lowercase().as_str() {
            "start" | "begin" => Command::Start,
            "set" => parse_set(rest),
            "goal" | "toggle" => parse_goal(rest),
            "goals" => Command::Goals,
            "submit" => Command::Submit,
            "assess" | "assessment" => Command::Assess,
            "plan" | "recommend" => Command::Plan,
            "next" | "continue" | "" => Command::Next,
            "restart" | "new" => Command::Restart,
            "dismiss" => Command::Dismiss,
            "show" | "status" => Command::Show,
            "server" => Command::Server,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "/quit" => Command::Quit,
            other => Command::Invalid(format!("Unknown command: {other}. Type 'help'.")),
        }
    }
}

fn parse_set(rest: &str) -> Command {
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((n, v)) => (n, v.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        return Command::Invalid("Usage: set <field> <value>".to_string());
    }
    match name.parse::<ProfileField>() {
        Ok(field) => Command::Set {
            field,
            value: value.to_string(),
        },
        Err(_) => Command::Invalid(format!("Unknown field: {name}")),
    }
}

/// `goal 3` picks from the catalog by number; otherwise the text is the goal,
/// matched case-insensitively against the catalog.
fn parse_goal(rest: &str) -> Command {
    if rest.is_empty() {
        return Command::Invalid("Usage: goal <number|name>".to_string());
    }
    if let Ok(n) = rest.parse::<usize>() {
        return match n.checked_sub(1).and_then(|i| GOAL_OPTIONS.get(i)) {
            Some(goal) => Command::Goal((*goal).to_string()),
            None => Command::Invalid(format!(
                "Pick a goal between 1 and {}",
                GOAL_OPTIONS.len()
            )),
        };
    }
    let goal = GOAL_OPTIONS
        .iter()
        .find(|g| g.eq_ignore_ascii_case(rest))
        .map(|g| (*g).to_string())
        .unwrap_or_else(|| rest.to_string());
    Command::Goal(goal)
}

/// Usage text for `help`.
pub const HELP: &str = "\
Commands:
  start                    begin on the welcome screen
  set <field> <value>      name, age, occupation, income, savings,
                           experience, risk, timeline
  goal <number|name>       toggle a financial goal (see 'goals')
  goals                    list goal choices
  submit | assess | plan   run the current step's request
  next                     whatever moves this screen forward
  restart                  start over from the dashboard
  dismiss                  clear the error message
  show                     redraw the screen
  server                   show what the backend stored for this session
  quit";

/// What the REPL should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Redraw, optionally with a one-line notice.
    Continue(Option<String>),
    Quit,
}

/// Apply a command to the wizard.
pub async fn execute(wizard: &mut WizardController, command: Command) -> Flow {
    let result: Result<Option<String>, WizardError> = match command {
        Command::Quit => return Flow::Quit,
        Command::Help => Ok(Some(HELP.to_string())),
        Command::Show => Ok(None),
        Command::Invalid(msg) => Ok(Some(msg)),
        Command::Goals => Ok(Some(goal_list(wizard))),
        Command::Start => wizard.start().map(|_| None),
        Command::Set { field, value } => wizard.set_field(field, &value).map(|_| None),
        Command::Goal(goal) => wizard.toggle_goal(&goal).map(|on| {
            Some(format!("{goal}: {}", if on { "selected" } else { "removed" }))
        }),
        Command::Submit => run(wizard, Action::SubmitProfile).await,
        Command::Assess => run(wizard, Action::StartAssessment).await,
        Command::Plan => run(wizard, Action::RequestPlan).await,
        Command::Restart => wizard.restart().map(|_| None),
        Command::Next => {
            let action = wizard.step().kind().forward_action();
            run(wizard, action).await
        }
        Command::Dismiss => {
            let cleared = wizard.dismiss_error();
            Ok((!cleared).then(|| "No error to dismiss".to_string()))
        }
        Command::Server => match wizard.server_snapshot().await {
            Ok(snap) => Ok(Some(render::render_snapshot(&snap))),
            Err(e) => Ok(Some(e.to_string())),
        },
    };

    match result {
        Ok(notice) => Flow::Continue(notice),
        Err(e) => Flow::Continue(Some(e.to_string())),
    }
}

/// Apply a command while still listening for input.
///
/// Lines that arrive while a call is outstanding are answered with a busy
/// notice and dropped, so they never run against the step the call lands
/// on. When the step goes to loading, its screen is passed to `show`.
/// `quit` abandons the call.
pub async fn dispatch<S>(
    wizard: &mut WizardController,
    command: Command,
    commands: &mut S,
    show: &mut impl FnMut(String),
) -> Flow
where
    S: Stream<Item = Command> + Unpin,
{
    let mut view = wizard.subscribe();
    let mut input_open = true;
    let action = execute(wizard, command);
    tokio::pin!(action);

    loop {
        tokio::select! {
            biased;

            flow = &mut action => return flow,
            Ok(()) = view.changed() => {
                let current = view.borrow_and_update().clone();
                if current.step.is_loading() {
                    show(render::render_view(&current));
                }
            }
            next = commands.next(), if input_open => match next {
                None => input_open = false,
                Some(Command::Quit) => {
                    tracing::warn!("Quit while a request was in flight");
                    return Flow::Quit;
                }
                Some(extra) => {
                    let step = view.borrow().step.kind();
                    tracing::debug!(?extra, %step, "Input dropped while busy");
                    show(WizardError::Busy { step }.to_string());
                }
            },
        }
    }
}

async fn run(
    wizard: &mut WizardController,
    action: Action,
) -> Result<Option<String>, WizardError> {
    // A failed call is already on screen as the error banner.
    match action {
        Action::Start => wizard.start().map(|_| None),
        Action::Restart => wizard.restart().map(|_| None),
        Action::SubmitProfile => wizard.submit_profile().await.map(|_| None),
        Action::StartAssessment => wizard.start_assessment().await.map(|_| None),
        Action::RequestPlan => wizard.request_plan().await.map(|_| None),
        Action::EditProfile | Action::DismissError => Ok(None),
    }
}

fn goal_list(wizard: &WizardController) -> String {
    GOAL_OPTIONS
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let mark = if wizard.draft().has_goal(g) { "x" } else { " " };
            format!("  {}. [{mark}] {g}", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stream of commands read from stdin. Ends at EOF and stays ended.
pub type CommandStream = Pin<Box<dyn Stream<Item = Command> + Send>>;

pub fn stdin_commands() -> CommandStream {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    tokio::spawn(async move {
        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(CommandParser::parse(&line)).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    break;
                }
            }
        }
    });

    Box::pin(
        stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|cmd| (cmd, rx)) }).fuse(),
    )
}
