//! Content listing commands

use anyhow::Result;
use clap::Subcommand;

use pearl::catalog;

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List story episodes
    Episodes,
    /// List practice sets
    Sets,
}

pub fn catalog_command(command: CatalogCommand) -> Result<()> {
    match command {
        CatalogCommand::Episodes => {
            println!("Episodes ({}):\n", catalog::episode_count());
            for episode in catalog::EPISODES {
                println!(
                    "  {}. {} ({} questions)",
                    episode.number,
                    episode.title,
                    episode.questions.len()
                );
            }
        }
        CatalogCommand::Sets => {
            println!("Practice sets ({}):\n", catalog::practice_sets().len());
            for set in catalog::practice_sets() {
                println!("  {} {} [{}]", set.icon, set.title, set.id);
                println!("    {}", set.description);
                println!("    {} questions", set.questions.len());
                println!();
            }
        }
    }
    Ok(())
}
