//! Balancing Equations console entry point
//!
//! Plays the game on stdin/stdout. Usage:
//!
//! ```text
//! balancing-equations [--seed N] [--settings PATH] [--scores PATH]
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;

use balancing_equations::consts::LEVEL_COUNT;
use balancing_equations::model::TermRef;
use balancing_equations::{BestScores, EquationCatalog, Feedback, GameModel, GamePhase, Settings};

const HELP: &str = "\
commands:
  start L      start level L (1-3)
  set r1 2     set reactant 1 (or p2 for product 2) to 2
  check        check the current answer
  try          try again after a wrong answer
  show         show the answer
  next         go to the next challenge
  new          back to level selection
  counts       atom counts on each side
  answer       balanced coefficients (show_answers only)
  quit";

#[derive(Parser, Debug)]
#[command(version, about = "Balance chemical equations in a scored console game")]
struct Args {
    /// Seed for challenge selection (defaults to the clock)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Settings JSON file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Best scores JSON file, loaded at start and saved after each level
    #[arg(long, value_name = "PATH")]
    scores: Option<PathBuf>,
}

/// Parse "r1" / "p2" into a term address (1-based on the command line)
fn parse_term(s: &str) -> Option<TermRef> {
    let (side, index) = s.split_at_checked(1)?;
    let index: usize = index.parse().ok()?;
    let index = index.checked_sub(1)?;
    match side {
        "r" => Some(TermRef::reactant(index)),
        "p" => Some(TermRef::product(index)),
        _ => None,
    }
}

fn print_status(model: &GameModel) {
    match model.phase() {
        GamePhase::LevelSelection => {
            println!("Choose a level (start 1-{}).", LEVEL_COUNT);
            for level in 0..LEVEL_COUNT {
                println!(
                    "  level {}: best {} / {}",
                    level + 1,
                    model.best_score(level),
                    model.perfect_score()
                );
            }
        }
        GamePhase::LevelComplete => {
            println!(
                "Level {} complete: {} / {} points in {:.0}s",
                model.level() + 1,
                model.points(),
                model.perfect_score(),
                model.elapsed().as_secs_f64()
            );
        }
        phase => {
            if let Some(equation) = model.current_equation() {
                println!(
                    "[{}/{}] score {}  {:?}",
                    model.current_index() + 1,
                    model.challenge_count(),
                    model.points(),
                    phase
                );
                println!("  {}", equation);
            }
            match model.feedback() {
                Some(Feedback::Correct { points }) => println!("  Correct! +{} points", points),
                Some(Feedback::BalancedNotSimplified) => {
                    println!("  Balanced, but not in lowest terms.")
                }
                Some(Feedback::NotBalanced) => println!("  Not balanced."),
                None => {}
            }
        }
    }
}

fn print_counts(model: &GameModel) {
    let Some(equation) = model.current_equation() else {
        return;
    };
    for count in equation.atom_counts() {
        let mark = if count.is_balanced() { "=" } else { "≠" };
        println!(
            "  {:>2}: {} {} {}",
            count.element, count.reactants_count, mark, count.products_count
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut model = GameModel::new(EquationCatalog::standard(), settings, seed);
    if let Some(path) = &args.scores {
        model.set_best_scores(BestScores::load(path, LEVEL_COUNT));
    }
    log::info!("Game initialized with seed: {}", seed);

    println!("{}", HELP);
    print_status(&model);

    let stdin = io::stdin();
    let mut last = Instant::now();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let now = Instant::now();
        model.tick(now - last);
        last = now;

        let words: Vec<&str> = line.split_whitespace().collect();
        let accepted = match words.as_slice() {
            [] => continue,
            ["quit" | "q"] => break,
            ["help"] => {
                println!("{}", HELP);
                continue;
            }
            ["start", level] => match level.parse::<usize>() {
                Ok(level @ 1..) => match model.start_game(level - 1) {
                    Ok(()) => true,
                    Err(e) => {
                        println!("  {}", e);
                        false
                    }
                },
                _ => {
                    println!("  levels are 1-{}", LEVEL_COUNT);
                    false
                }
            },
            ["set", term, value] => match (parse_term(term), value.parse::<u32>()) {
                (Some(term), Ok(value)) => model.set_user_coefficient(term, value),
                _ => {
                    println!("  usage: set r1 2");
                    false
                }
            },
            ["check"] => model.check(),
            ["try"] => model.try_again(),
            ["show"] => model.show_answer(),
            ["next"] => model.next(),
            ["new"] => model.new_game(),
            ["counts"] => {
                print_counts(&model);
                continue;
            }
            ["answer"] => {
                match model.answer() {
                    Some(answer) => println!("  {}", answer),
                    None => println!("  answers are hidden (enable show_answers)"),
                }
                continue;
            }
            _ => {
                println!("  unknown command, try 'help'");
                continue;
            }
        };

        if !accepted {
            println!("  (not now)");
        }
        print_status(&model);

        if model.phase() == GamePhase::LevelComplete {
            if let Some(path) = &args.scores {
                if let Err(e) = model.best_scores().save(path) {
                    log::warn!("Could not save best scores: {}", e);
                }
            }
        }
    }

    if let Some(path) = &args.scores {
        if let Err(e) = model.best_scores().save(path) {
            log::warn!("Could not save best scores: {}", e);
        }
    }
}
