//! Practice set commands
//!
//! Practice progress is never saved, so a set is played start to finish
//! inside one interactive `play` loop.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::io::{BufRead, Write};

use pearl::catalog;
use pearl::practice::{PracticeStep, PracticeTracker};
use pearl::present::{
    practice_answer_notification, practice_error_notification, practice_hint_notification,
    practice_step_notification,
};
use pearl::sync::ProgressSync;

use super::context::AppContext;
use super::{notify, option_index};

#[derive(Subcommand)]
pub enum PracticeCommand {
    /// List practice sets
    List,
    /// Play a practice set interactively
    Play { set_id: String },
}

/// One line of input inside the play loop
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Select(usize),
    Submit,
    Hint,
    Next,
    Status,
    Exit,
    Help,
}

fn parse_input(line: &str) -> Option<Input> {
    let mut parts = line.split_whitespace();
    let word = parts.next()?;
    let input = match word {
        "select" | "s" => Input::Select(parts.next()?.parse().ok()?),
        "submit" | "ok" => Input::Submit,
        "hint" | "h" => Input::Hint,
        "next" | "n" => Input::Next,
        "status" => Input::Status,
        "exit" | "quit" | "q" => Input::Exit,
        "help" | "?" => Input::Help,
        // a bare number selects that option
        other => Input::Select(other.parse().ok()?),
    };
    Some(input)
}

const HELP: &str = "Commands: <n> | select <n>, submit, hint, next, status, exit";

pub fn practice_command(ctx: &AppContext, command: PracticeCommand) -> Result<()> {
    match command {
        PracticeCommand::List => {
            for set in catalog::practice_sets() {
                println!("  {:<16} {} ({} questions)", set.id, set.title, set.questions.len());
            }
            Ok(())
        }
        PracticeCommand::Play { set_id } => play(&set_id, &ctx.sync()),
    }
}

fn play(set_id: &str, sync: &ProgressSync) -> Result<()> {
    let mut tracker = PracticeTracker::new();
    if let Err(e) = tracker.start(set_id) {
        notify(&practice_error_notification(&e));
        return Ok(());
    }
    if let Some(session) = tracker.active() {
        println!("{}\n{}\n", session.set().title, session.set().description);
    }
    println!("{HELP}\n");
    print_question(&tracker);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    while tracker.active().is_some() {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        let Some(input) = parse_input(&line) else {
            if !line.trim().is_empty() {
                println!("{HELP}");
            }
            continue;
        };

        match input {
            Input::Select(number) => {
                let index = match option_index(number) {
                    Ok(index) => index,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                match tracker.select_option(index) {
                    Ok(()) => println!("Selected option {number}"),
                    Err(e) => notify(&practice_error_notification(&e)),
                }
            }
            Input::Submit => match tracker.submit() {
                Ok(answer) => notify(&practice_answer_notification(&answer)),
                Err(e) => notify(&practice_error_notification(&e)),
            },
            Input::Hint => match tracker.request_hint() {
                Ok(hint) => notify(&practice_hint_notification(hint, tracker.state().hints)),
                Err(e) => notify(&practice_error_notification(&e)),
            },
            Input::Next => match tracker.next() {
                Ok(step) => {
                    if let Some(n) = practice_step_notification(&step) {
                        notify(&n);
                    }
                    match step {
                        PracticeStep::Question(_) => print_question(&tracker),
                        PracticeStep::Finished(outcome) => {
                            sync.practice(&outcome);
                        }
                    }
                }
                Err(e) => notify(&practice_error_notification(&e)),
            },
            Input::Status => {
                let state = tracker.state();
                println!(
                    "Question {} | Lives: {} | Hints: {} | Score: {}",
                    state.current_question_index + 1,
                    state.lives,
                    state.hints,
                    state.score
                );
            }
            Input::Exit => {
                tracker.exit();
                println!("Left the practice set.");
            }
            Input::Help => println!("{HELP}"),
        }
    }
    Ok(())
}

fn print_question(tracker: &PracticeTracker) {
    let Some(session) = tracker.active() else {
        return;
    };
    let question = session.current_question();
    println!(
        "Question {}/{}: {}",
        session.state().current_question_index + 1,
        session.set().questions.len(),
        question.prompt
    );
    if let Some(code) = question.code {
        for line in code.lines() {
            println!("    {}", line);
        }
    }
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("2"), Some(Input::Select(2)));
        assert_eq!(parse_input("select 3"), Some(Input::Select(3)));
        assert_eq!(parse_input("  submit "), Some(Input::Submit));
        assert_eq!(parse_input("q"), Some(Input::Exit));
        assert_eq!(parse_input("select"), None);
        assert_eq!(parse_input("dance"), None);
        assert_eq!(parse_input(""), None);
    }
}
