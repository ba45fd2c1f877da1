use crate::clock::{is_correct, CanonicalTime};
use crate::leaderboard::Leaderboard;
use crate::parser::{self, ParseOutcome};
use crate::round::{RandomRounds, Round, RoundGenerator};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::time::{Duration, Instant};

/// Result of answering one round
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub correct: bool,
    /// The guess came in after the round's time limit
    pub timed_out: bool,
    pub outcome: ParseOutcome,
    /// Target as the game announces it ("3:15 pm")
    pub target: CanonicalTime,
}

/// A fixed number of rounds, one guess each
pub struct Game<G: RoundGenerator> {
    generator: G,
    rounds_total: u32,
    round_limit: Option<Duration>,
    played: u32,
    score: u32,
    current: Option<Round>,
}

impl<G: RoundGenerator> Game<G> {
    pub fn new(generator: G, rounds_total: u32) -> Self {
        Self { generator, rounds_total, round_limit: None, played: 0, score: 0, current: None }
    }

    /// Fail any answer given later than `limit` after the round started
    pub fn with_round_limit(mut self, limit: Option<Duration>) -> Self {
        self.round_limit = limit;
        self
    }

    pub fn round_limit(&self) -> Option<Duration> {
        self.round_limit
    }

    /// Draw the next target, or `None` once every round has been played
    pub fn next_round(&mut self) -> Option<Round> {
        if self.is_over() {
            return None;
        }
        let round = self.generator.next_round();
        self.current = Some(round);
        Some(round)
    }

    /// Grade a guess for the current round with no clock running
    pub fn answer(&mut self, guess: &str) -> Option<Answer> {
        self.answer_at(guess, Duration::ZERO)
    }

    /// Grade a guess given `elapsed` after the round was shown.
    ///
    /// Each round takes one guess. A blank guess returns `None` and leaves the
    /// round open; a guess past the time limit is graded as wrong.
    pub fn answer_at(&mut self, guess: &str, elapsed: Duration) -> Option<Answer> {
        if guess.trim().is_empty() {
            return None;
        }
        let round = self.current.take()?;
        let outcome = parser::parse(guess);
        let timed_out = self.round_limit.is_some_and(|limit| elapsed > limit);
        let correct = !timed_out
            && outcome
                .as_ref()
                .map(|parsed| is_correct(parsed, round.hour, round.minute))
                .unwrap_or(false);

        self.played += 1;
        if correct {
            self.score += 1;
        }
        Some(Answer { correct, timed_out, outcome, target: CanonicalTime::from_target(&round) })
    }

    pub fn round_number(&self) -> u32 {
        self.played + 1
    }

    pub fn rounds_total(&self) -> u32 {
        self.rounds_total
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.played >= self.rounds_total
    }
}

/// Interactive terminal version of the quiz
pub struct Application {
    rounds: u32,
    round_limit: Option<Duration>,
    player: Option<String>,
    leaderboard: Option<Leaderboard>,
}

impl Application {
    pub fn new(rounds: u32, round_limit: Option<Duration>) -> Self {
        Self { rounds, round_limit, player: None, leaderboard: None }
    }

    /// Record the final score under `player` when the game ends
    pub fn with_leaderboard(mut self, player: String, leaderboard: Leaderboard) -> Self {
        self.player = Some(player);
        self.leaderboard = Some(leaderboard);
        self
    }

    pub fn run(&self) -> Result<()> {
        log::info!("Starting terminal game with {} rounds", self.rounds);
        let mut game =
            Game::new(RandomRounds::new(), self.rounds).with_round_limit(self.round_limit);
        let mut rl = DefaultEditor::new()?;

        println!("Say each time in English, e.g. \"quarter past three\" or \"3:15 pm\".");
        if let Some(limit) = game.round_limit() {
            println!("You have {} seconds per round.", limit.as_secs());
        }

        while let Some(round) = game.next_round() {
            println!(
                "\nRound {} / {}: {:02}:{:02}",
                game.round_number(),
                game.rounds_total(),
                round.hour,
                round.minute
            );

            let started = Instant::now();
            let answer = loop {
                let line = match rl.readline("🕒 ") {
                    Ok(line) => line,
                    Err(ReadlineError::Interrupted) => {
                        println!("CTRL-C");
                        return Ok(());
                    }
                    Err(ReadlineError::Eof) => {
                        println!("CTRL-D");
                        return Ok(());
                    }
                    Err(err) => return Err(err.into()),
                };

                match game.answer_at(&line, started.elapsed()) {
                    Some(answer) => {
                        let _ = rl.add_history_entry(line.as_str());
                        break answer;
                    }
                    None => println!("Type a time first, e.g. \"ten past four\"."),
                }
            };
            print_answer(&answer);
        }

        println!("\nGame over. Final score: {}/{}.", game.score(), game.rounds_total());
        self.record_score(game.score())
    }

    fn record_score(&self, score: u32) -> Result<()> {
        if let (Some(player), Some(leaderboard)) = (&self.player, &self.leaderboard) {
            let entry = leaderboard.submit(player, score)?;
            println!("Saved {} points for {}.", entry.score, entry.name);
        }
        Ok(())
    }
}

fn print_answer(answer: &Answer) {
    if answer.timed_out {
        println!("⏰ Time's up! It was {}.", answer.target);
        return;
    }
    match (&answer.outcome, answer.correct) {
        (_, true) => println!("✅ Correct! It was {}.", answer.target),
        (Ok(parsed), false) => {
            println!("❌ Not quite. You said {}, it was {}.", parsed, answer.target)
        }
        (Err(reason), false) => {
            println!("❌ Not quite ({}). It was {}.", reason, answer.target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TimeParseError;
    use pretty_assertions::assert_eq;

    struct FixedRounds(Vec<Round>);

    impl RoundGenerator for FixedRounds {
        fn next_round(&mut self) -> Round {
            self.0.remove(0)
        }
    }

    #[test]
    fn test_game_scores_correct_answers() {
        let rounds = FixedRounds(vec![
            Round { hour: 15, minute: 15 },
            Round { hour: 0, minute: 30 },
            Round { hour: 9, minute: 45 },
        ]);
        let mut game = Game::new(rounds, 3);

        assert_eq!(game.next_round(), Some(Round { hour: 15, minute: 15 }));
        let answer = game.answer("quarter past three").unwrap();
        assert!(answer.correct);
        assert_eq!(answer.target.to_string(), "3:15 pm");

        game.next_round();
        assert_eq!(game.round_number(), 2);
        let answer = game.answer("half past twelve").unwrap();
        assert!(answer.correct);

        game.next_round();
        let answer = game.answer("gibberish").unwrap();
        assert!(!answer.correct);
        assert_eq!(answer.outcome, Err(TimeParseError::Unrecognized));

        assert!(game.is_over());
        assert_eq!(game.score(), 2);
        assert_eq!(game.next_round(), None);
    }

    #[test]
    fn test_answer_without_round_is_ignored() {
        let mut game = Game::new(FixedRounds(vec![Round { hour: 1, minute: 0 }]), 1);
        assert_eq!(game.answer("one"), None);

        game.next_round();
        assert!(game.answer("one o'clock").unwrap().correct);
        assert_eq!(game.answer("one o'clock"), None);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_blank_guess_keeps_round_open() {
        let mut game = Game::new(FixedRounds(vec![Round { hour: 4, minute: 10 }]), 1);
        game.next_round();

        assert_eq!(game.answer(""), None);
        assert_eq!(game.answer("   \t"), None);
        assert_eq!(game.round_number(), 1);
        assert!(!game.is_over());

        assert!(game.answer("ten past four").unwrap().correct);
        assert!(game.is_over());
    }

    #[test]
    fn test_answer_after_time_limit_fails() {
        let rounds = FixedRounds(vec![Round { hour: 16, minute: 10 }, Round { hour: 2, minute: 0 }]);
        let mut game = Game::new(rounds, 2).with_round_limit(Some(Duration::from_secs(20)));

        game.next_round();
        let answer = game.answer_at("ten past four", Duration::from_secs(21)).unwrap();
        assert!(answer.timed_out);
        assert!(!answer.correct);
        assert_eq!(answer.target.to_string(), "4:10 pm");

        game.next_round();
        let answer = game.answer_at("two o'clock", Duration::from_secs(20)).unwrap();
        assert!(!answer.timed_out);
        assert!(answer.correct);

        assert_eq!(game.score(), 1);
        assert!(game.is_over());
    }

    #[test]
    fn test_no_limit_never_times_out() {
        let mut game = Game::new(FixedRounds(vec![Round { hour: 9, minute: 0 }]), 1);
        game.next_round();
        let answer = game.answer_at("nine", Duration::from_secs(3600)).unwrap();
        assert!(!answer.timed_out);
        assert!(answer.correct);
    }
}
