//! Who picks the choices: a person at the terminal or a random autoplayer.

use std::io::{self, BufRead, Write};

use rand::Rng;
use sanctuary_core::{Event, GameState};

/// Something that answers events on the player's behalf.
pub trait Player {
    /// Index of the chosen option, or `None` to quit.
    fn choose(&mut self, event: &Event, state: &GameState) -> io::Result<Option<usize>>;

    /// Whether to end the day and continue. `false` quits.
    fn end_day(&mut self, _state: &GameState) -> io::Result<bool> {
        Ok(true)
    }
}

/// Reads choices from a line-oriented input.
pub struct Terminal<I> {
    input: I,
}

impl<I: BufRead> Terminal<I> {
    pub fn new(input: I) -> Self {
        Self { input }
    }

    /// Next trimmed line, or `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        print!("{text}");
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<I: BufRead> Player for Terminal<I> {
    fn choose(&mut self, event: &Event, _state: &GameState) -> io::Result<Option<usize>> {
        loop {
            let Some(line) = self.prompt("> ")? else {
                return Ok(None);
            };
            if line == "q" || line == "quit" {
                return Ok(None);
            }
            match parse_choice(&line, event.choices.len()) {
                Some(index) => return Ok(Some(index)),
                None => println!("Pick a number from 1 to {}.", event.choices.len()),
            }
        }
    }

    fn end_day(&mut self, _state: &GameState) -> io::Result<bool> {
        match self.prompt("[Enter] End Day  [q] Quit ")? {
            Some(line) => Ok(line != "q" && line != "quit"),
            None => Ok(false),
        }
    }
}

/// Map 1-based user input to a 0-based choice index.
pub fn parse_choice(input: &str, options: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=options).contains(&n).then(|| n - 1)
}

/// Picks uniformly among the offered choices.
pub struct RandomPlayer<R> {
    rng: R,
}

impl<R: Rng> RandomPlayer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Player for RandomPlayer<R> {
    fn choose(&mut self, event: &Event, _state: &GameState) -> io::Result<Option<usize>> {
        if event.choices.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.rng.gen_range(0..event.choices.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use sanctuary_core::{Location, Role, SimulationEngine};

    fn opening() -> (Event, GameState) {
        let mut engine = SimulationEngine::seeded(5);
        let event = engine.start_game(Role::Denizen, Location::Portland).unwrap();
        let state = engine.state().unwrap().clone();
        (event, state)
    }

    #[test]
    fn parse_choice_is_one_based() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3 ", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("run", 3), None);
    }

    #[test]
    fn terminal_skips_bad_input_until_valid() {
        let (event, state) = opening();
        let mut player = Terminal::new("nope\n9\n2\n".as_bytes());
        assert_eq!(player.choose(&event, &state).unwrap(), Some(1));
    }

    #[test]
    fn terminal_quits_on_eof_or_q() {
        let (event, state) = opening();
        assert_eq!(Terminal::new("".as_bytes()).choose(&event, &state).unwrap(), None);
        assert_eq!(Terminal::new("q\n".as_bytes()).choose(&event, &state).unwrap(), None);
        assert!(!Terminal::new("q\n".as_bytes()).end_day(&state).unwrap());
        assert!(Terminal::new("\n".as_bytes()).end_day(&state).unwrap());
    }

    #[test]
    fn random_player_returns_valid_index() {
        let (event, state) = opening();
        let mut player = RandomPlayer::new(rand::rngs::StdRng::seed_from_u64(1));
        for _ in 0..50 {
            let choice = player.choose(&event, &state).unwrap().unwrap();
            assert!(choice < event.choices.len());
        }
    }
}
