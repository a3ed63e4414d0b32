use std::{
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

use clap::{Parser, Subcommand};
use owo_colors::{OwoColorize, Stream};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;
use wordle_cheat::{
    opening::COMMON_LETTERS, FeedbackRule, Grade, Harness, HintSource, LocalHints, Outcome,
    OpeningHeuristic, Settled, Solver, TranscribedHints, Turn, Word, WordleError, Wordlist,
};

/// Solve Wordle puzzles by narrowing a dictionary with each guess's feedback.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Newline-delimited list of five letter words to draw guesses from.
    #[clap(short, long, default_value = "words.txt")]
    words: PathBuf,

    /// Letters the opening guesses try to cover.
    #[clap(long, default_value = COMMON_LETTERS)]
    common_letters: String,

    /// Seed for every random choice, for reproducible runs.
    ///
    /// If not passed, a seed is drawn from the operating system.
    #[clap(short, long)]
    seed: Option<u64>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a simulated puzzle with a known answer.
    Simulate {
        /// The hidden answer. Defaults to a random dictionary word.
        #[clap(short, long)]
        answer: Option<String>,

        /// Count duplicate letters the way Wordle does instead of checking
        /// each letter on its own.
        #[clap(long)]
        counted: bool,

        /// Print the result as JSON.
        #[clap(long)]
        json: bool,
    },

    /// Solve a live puzzle, typing back the tile colors for each guess.
    Transcribe {
        /// Milliseconds to wait after each guess before the next one.
        #[clap(long, default_value = "0")]
        settle_ms: u64,

        /// Print the result as JSON.
        #[clap(long)]
        json: bool,
    },

    /// Play many simulated puzzles and summarize how the solver did.
    Bench {
        /// The number of games to play.
        #[clap(short, long, default_value = "100")]
        games: usize,

        /// Play one game for every word in the dictionary.
        #[clap(long, conflicts_with = "games")]
        all: bool,

        /// Count duplicate letters the way Wordle does.
        #[clap(long)]
        counted: bool,

        /// Show a progress bar.
        #[clap(short, long)]
        verbose: bool,

        /// Also print every game's guesses in a grid.
        #[clap(long)]
        grid: bool,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    outcome: Outcome,
    guesses: &'a [Word],
}

fn rule(counted: bool) -> FeedbackRule {
    if counted {
        FeedbackRule::Counted
    } else {
        FeedbackRule::Independent
    }
}

fn main() -> Result<(), WordleError> {
    env_logger::init();
    let args = Args::parse();

    let words = Wordlist::from_path(&args.words)?;
    let heuristic = OpeningHeuristic::new(&args.common_letters)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("{} words in {}", words.len(), args.words.display());

    match args.command {
        Command::Simulate {
            answer,
            counted,
            json,
        } => {
            let answer = match answer {
                Some(a) => Word::new(&a)?,
                None => *words.choose(&mut rng).ok_or(WordleError::EmptyWordlist)?,
            };
            log::info!("simulating a puzzle for {}", answer);
            let mut hints = LocalHints::new(answer).rule(rule(counted));
            solve(&words, &heuristic, &mut rng, &mut hints, json)
        }
        Command::Transcribe { settle_ms, json } => {
            let stdin = io::stdin();
            let hints = TranscribedHints::new(stdin.lock(), io::stdout());
            let mut hints = Settled::new(hints, Duration::from_millis(settle_ms));
            solve(&words, &heuristic, &mut rng, &mut hints, json)
        }
        Command::Bench {
            games,
            all,
            counted,
            verbose,
            grid,
        } => {
            let mut harness = Harness::new()
                .rule(rule(counted))
                .heuristic(heuristic)
                .seed(rng.gen());
            harness = if all {
                harness.test_all()
            } else {
                harness.test_num(games)
            };
            if verbose {
                harness = harness.verbose();
            }

            let perf = harness.run(&words)?;
            if grid {
                perf.print()?;
            } else {
                perf.to_summary().print()?;
            }
            println!("seed {}", perf.seed());
            Ok(())
        }
    }
}

fn solve<H: HintSource>(
    words: &Wordlist,
    heuristic: &OpeningHeuristic,
    rng: &mut StdRng,
    hints: &mut H,
    json: bool,
) -> Result<(), WordleError> {
    let mut solver = Solver::with_heuristic(words.pool(), heuristic, StdRng::seed_from_u64(rng.gen()));
    let outcome = solver.run_with(hints, |turn| {
        if !json {
            print_turn(turn);
        }
    })?;

    let guesses = solver.attempts().inner();
    let mut stdout = io::stdout();
    if json {
        let report = Report { outcome, guesses };
        serde_json::to_writer_pretty(&mut stdout, &report).map_err(io::Error::from)?;
        writeln!(stdout)?;
        return Ok(());
    }

    match outcome {
        Outcome::Solved { answer, turns } => {
            let guesses: Vec<&str> = guesses.iter().map(|w| &**w).collect();
            writeln!(
                stdout,
                "\nanswer={} found on turn {}, guesses=[{}]",
                answer,
                turns,
                guesses.join(", ")
            )?;
        }
        Outcome::Exhausted { remaining } => {
            writeln!(
                stdout,
                "\nRan out of turns. Word list was narrowed down to: {} words",
                remaining
            )?;
            log::info!("known so far: {}", solver.knowledge());
        }
    }
    Ok(())
}

fn print_turn(turn: &Turn) {
    let tiles: String = turn
        .feedback
        .grades(&turn.guess)
        .iter()
        .zip(turn.guess.chars())
        .map(|(grade, c)| {
            let tile = format!(" {} ", c.to_ascii_uppercase());
            match grade {
                Grade::Correct => tile
                    .if_supports_color(Stream::Stdout, |t| t.on_green())
                    .to_string(),
                Grade::Almost => tile
                    .if_supports_color(Stream::Stdout, |t| t.on_yellow())
                    .to_string(),
                Grade::Incorrect => tile
                    .if_supports_color(Stream::Stdout, |t| t.on_bright_black())
                    .to_string(),
            }
        })
        .collect();
    println!("{}  {} candidates left", tiles, turn.remaining);
}
