use std::io::{self, Write};
use std::time::Duration;

use crossbeam_channel::{select, Receiver};
use rand::Rng;

use crate::game::{Game, GameOver, GameState};
use crate::input::Intent;
use crate::term::TermManager;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    GameOver(GameOver),
}

/// Drives the game: one tick per timer expiry or per batch of key presses,
/// whichever comes first, then a redraw.
pub struct TickScheduler {
    intents: Receiver<Intent>,
    interval: Duration,
}

impl TickScheduler {
    pub fn new(intents: Receiver<Intent>, interval: Duration) -> Self {
        TickScheduler { intents, interval }
    }

    pub fn run<R: Rng, W: Write>(&self, game: &mut Game<R>, term: &mut TermManager<W>) -> io::Result<Outcome> {
        term.draw(game.grid())?;

        loop {
            if let GameState::GameOver(reason) = game.state() {
                return Ok(Outcome::GameOver(reason));
            }

            let first = select! {
                recv(self.intents) -> msg => match msg {
                    Ok(intent) => Some(intent),
                    // Listener is gone and nothing can steer any more
                    Err(_) => Some(Intent::Quit),
                },
                default(self.interval) => None,
            };

            if !self.apply(game, first.into_iter().chain(self.intents.try_iter())) {
                log::info!("quit requested");
                return Ok(Outcome::Quit);
            }

            game.tick();
            term.draw(game.grid())?;
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Feeds the intent that woke us, plus any that queued up behind it, to the
    /// game. Returns false if one of them was a quit.
    fn apply<R: Rng>(&self, game: &mut Game<R>, intents: impl Iterator<Item = Intent>) -> bool {
        for intent in intents {
            match intent {
                Intent::Turn(dir) => {
                    game.request_heading(dir);
                },
                Intent::Quit => return false,
                Intent::Wake => {},
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{Direction::*, Snake};
    use crate::Coords;
    use crossbeam_channel::unbounded;
    use rand::{rngs::StdRng, SeedableRng};

    const SLOW: Duration = Duration::from_secs(60);
    const FAST: Duration = Duration::from_millis(1);

    fn game(snake: Snake) -> Game {
        Game::with_snake(10, 10, snake, StdRng::seed_from_u64(7))
    }

    #[test]
    fn quit_without_ticking() {
        let (tx, rx) = unbounded();
        let mut game = game(Snake::new(Coords::new(9, 1), 2, Right));
        let mut term = TermManager::new(Vec::new());

        // A tick would run the snake into the wall
        tx.send(Intent::Quit).unwrap();
        let outcome = TickScheduler::new(rx, SLOW).run(&mut game, &mut term).unwrap();

        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.snake().head(), Coords::new(9, 1));
    }

    #[test]
    fn timer_ticks_until_the_wall() {
        let (_tx, rx) = unbounded();
        let mut game = game(Snake::new(Coords::new(3, 1), 4, Right));
        let mut term = TermManager::new(Vec::new());

        let outcome = TickScheduler::new(rx, FAST).run(&mut game, &mut term).unwrap();

        assert_eq!(outcome, Outcome::GameOver(GameOver::WallCollision));
        assert!(!term.writer().is_empty());
    }

    #[test]
    fn key_press_ticks_immediately() {
        let (tx, rx) = unbounded();
        let mut game = game(Snake::new(Coords::new(8, 1), 2, Right));
        let mut term = TermManager::new(Vec::new());

        // The two queued wake-ups share one tick to (9,1), the late one runs
        // the snake off the board. The timer alone would take a minute.
        tx.send(Intent::Wake).unwrap();
        tx.send(Intent::Wake).unwrap();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            tx.send(Intent::Wake).unwrap();
            tx
        });

        let outcome = TickScheduler::new(rx, SLOW).run(&mut game, &mut term).unwrap();
        drop(handle.join().unwrap());

        assert_eq!(outcome, Outcome::GameOver(GameOver::WallCollision));
    }

    #[test]
    fn queued_turns_coalesce_into_one_tick() {
        let (tx, rx) = unbounded();
        let mut game = game(Snake::new(Coords::new(3, 1), 4, Right));
        let mut term = TermManager::new(Vec::new());

        tx.send(Intent::Turn(Up)).unwrap();
        tx.send(Intent::Turn(Down)).unwrap();
        tx.send(Intent::Turn(Left)).unwrap();
        drop(tx);

        // Up then Down then a rejected Left: one tick going down, then the
        // closed channel reads as a quit.
        let outcome = TickScheduler::new(rx, SLOW).run(&mut game, &mut term).unwrap();

        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(game.snake().head(), Coords::new(3, 2));
        assert_eq!(game.snake().heading(), Down);
    }

    #[test]
    fn finished_game_reports_immediately() {
        let (_tx, rx) = unbounded();
        let mut game = Game::with_rng(1, 1, StdRng::seed_from_u64(7));
        let mut term = TermManager::new(Vec::new());

        let outcome = TickScheduler::new(rx, SLOW).run(&mut game, &mut term).unwrap();
        assert_eq!(outcome, Outcome::GameOver(GameOver::BoardFull));
    }
}
