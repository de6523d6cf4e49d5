//! Taiken Story commands

use anyhow::Result;
use clap::Subcommand;

use pearl::catalog;
use pearl::lives::{format_countdown, wait_for_next_life, RegenStatus};
use pearl::present::{story_error_notification, story_hint_notification, story_notification};
use pearl::story::{Phase, StoryEvent, MAX_LIVES};
use pearl::taiken::TaikenSession;

use super::context::{AppContext, SharedStore};
use super::{notify, option_index};

#[derive(Subcommand)]
pub enum StoryCommand {
    /// Show the current question and progress
    Status,

    /// Answer the current question (options are numbered from 1)
    Answer { option: usize },

    /// Move on after answering
    Advance,

    /// Show a hint for the current question
    Hint,

    /// Replay an unlocked episode
    Episode { number: u32 },

    /// Start over from episode 1
    Reset,

    /// Gain one life (watch an ad)
    GainLife,

    /// Restore all lives (buy)
    Refill,

    /// Wait until lives have regenerated
    WaitLife,
}

pub async fn story_command(ctx: &AppContext, command: StoryCommand) -> Result<()> {
    let mut session = ctx.story();

    let result = match command {
        StoryCommand::Status => {
            print_status(&session);
            return Ok(());
        }
        StoryCommand::Answer { option } => session.submit_answer(Some(option_index(option)?)),
        StoryCommand::Advance => session.advance(),
        StoryCommand::Hint => {
            match session.hint() {
                Ok(hint) => notify(&story_hint_notification(hint)),
                Err(e) => notify(&story_error_notification(&e)),
            }
            return Ok(());
        }
        StoryCommand::Episode { number } => session.select_episode(number),
        StoryCommand::Reset => Ok(session.reset()),
        StoryCommand::GainLife => Ok(session.gain_life()),
        StoryCommand::Refill => Ok(session.refill_lives()),
        StoryCommand::WaitLife => {
            wait_for_lives(&mut session).await;
            return Ok(());
        }
    };

    match result {
        Ok(events) => {
            report(&events);
            if session.machine().phase() == Phase::AwaitingAnswer {
                println!();
                print_question(&session);
            }
        }
        Err(e) => notify(&story_error_notification(&e)),
    }
    Ok(())
}

fn report(events: &[StoryEvent]) {
    if events.is_empty() {
        println!("Nothing to do.");
    }
    for event in events {
        if let Some(n) = story_notification(event) {
            notify(&n);
        }
    }
}

async fn wait_for_lives(session: &mut TaikenSession<SharedStore>) {
    while session.state().lives < MAX_LIVES {
        if let RegenStatus::Waiting(left) = session.regen_status() {
            println!(
                "Lives: {}/{}. Next life in {}",
                session.state().lives,
                MAX_LIVES,
                format_countdown(left)
            );
        }
        let mut fired = false;
        wait_for_next_life(session.regen(), session.machine(), || fired = true).await;
        if fired {
            let mut events = session.catch_up();
            if events.is_empty() && session.state().regen_started_at.is_none() {
                // saved before the timer existed; nothing to catch up from
                events = session.gain_life();
            }
            report(&events);
        }
    }
    println!("Lives are full ({}/{}).", MAX_LIVES, MAX_LIVES);
}

fn print_status(session: &TaikenSession<SharedStore>) {
    let state = session.state();
    let machine = session.machine();

    println!(
        "Episode {} - {} | Question {}",
        state.current_episode,
        machine.chapter_title(),
        state.current_question
    );
    println!(
        "Lives: {}/{} | Score: {} | Progress: {}%",
        state.lives,
        MAX_LIVES,
        state.score,
        machine.progress_percent()
    );
    let unlocked: Vec<String> = (1..=catalog::episode_count())
        .map(|n| {
            let mark = if state.is_episode_complete(n) {
                "done"
            } else if n <= state.current_episode {
                "open"
            } else {
                "locked"
            };
            format!("{n}:{mark}")
        })
        .collect();
    println!("Episodes: {}", unlocked.join("  "));
    println!("Phase: {}", machine.phase().label());
    if let RegenStatus::Waiting(left) = session.regen_status() {
        println!("Next life in {}", format_countdown(left));
    }
    println!();

    if machine.phase() != Phase::StoryComplete {
        print_question(session);
    }
}

fn print_question(session: &TaikenSession<SharedStore>) {
    let Ok(question) = session.current_question() else {
        return;
    };
    println!("{}", question.prompt);
    if let Some(code) = question.code {
        println!();
        for line in code.lines() {
            println!("    {}", line);
        }
        println!();
    }
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
}
