//! Library command implementation.

use anyhow::Result;
use vapor_core::{Config, LibraryObserver, ResolvedGame, Vapor};

/// Prints ratings as they arrive.
struct StreamPrinter {
    total: usize,
    done: usize,
}

impl LibraryObserver for StreamPrinter {
    fn on_snapshot(&mut self, games: &[ResolvedGame]) {
        self.total = games.len();
        println!("Found {} games, resolving ratings...", self.total);
    }

    fn on_update(&mut self, game: &ResolvedGame) {
        self.done += 1;
        println!(
            "[{}/{}] {}: {}",
            self.done, self.total, game.name, game.rating
        );
    }
}

/// Run the library command
pub async fn run(config: &Config, user_id: &str, stream: bool) -> Result<()> {
    let mut vapor = Vapor::from_config(config)?;

    let result = if stream {
        let mut printer = StreamPrinter { total: 0, done: 0 };
        vapor.fetch_library(user_id, &mut printer).await?
    } else {
        vapor.fetch_library(user_id, ()).await?
    };

    println!();
    for game in &result.games {
        let hours = game.playtime as f64 / 60.0;
        println!("{:<10} {:>8.1}h  {}", game.rating, hours, game.name);
    }
    println!();
    println!("Average rating: {}", result.average);

    Ok(())
}
