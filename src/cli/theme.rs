//! Theme preference commands

use anyhow::Result;
use clap::Subcommand;

use pearl::prefs;

use super::context::AppContext;

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Print the saved theme
    Show,
    /// Switch between light and dark
    Toggle,
}

pub fn theme_command(ctx: &AppContext, command: ThemeCommand) -> Result<()> {
    let current = prefs::load_theme(&ctx.persistence);
    match command {
        ThemeCommand::Show => println!("{}", current),
        ThemeCommand::Toggle => {
            let next = current.toggle();
            prefs::save_theme(&ctx.persistence, next);
            println!("Theme: {} -> {}", current, next);
        }
    }
    Ok(())
}
