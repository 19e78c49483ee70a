use clap::{Parser, ValueEnum};
use rand::Rng;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use klondike::{Game, GameConfig, Move, PileGroup, StockAction};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Weighted random choice over every legal move and the stock
    Random,
    /// Follow the engine's hint, draw from the stock when there is none
    Hint,
}

/// Headless Klondike autoplay
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: u32,

    /// Maximum steps per game before giving up
    #[arg(short, long, default_value_t = 1000)]
    max_steps: u32,

    /// How the player picks its next action
    #[arg(short, long, value_enum, default_value_t = Policy::Random)]
    policy: Policy,

    /// Take a snapshot before stock draws so they can be undone
    #[arg(long)]
    undoable_draws: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    /// Print game state every N steps (0 = never)
    #[arg(long, default_value_t = 0)]
    print_interval: u32,

    /// Number of threads to use (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Draw,
    Move(Move),
}

// draw, waste->foundation, waste->tableau, tableau->foundation, tableau->tableau
const WEIGHTS: [u32; 5] = [5, 20, 10, 20, 5];

fn weight(action: &Action) -> u32 {
    match action {
        Action::Draw => WEIGHTS[0],
        Action::Move(mv) => match (mv.from, mv.to) {
            (PileGroup::Waste, PileGroup::Foundation) => WEIGHTS[1],
            (PileGroup::Waste, PileGroup::Tableau) => WEIGHTS[2],
            (PileGroup::Tableau, PileGroup::Foundation) => WEIGHTS[3],
            _ => WEIGHTS[4],
        },
    }
}

/// Sample an action using weighted probabilities
fn sample_action<R: Rng>(valid_actions: &[Action], rng: &mut R) -> Option<Action> {
    let total: u32 = valid_actions.iter().map(weight).sum();
    if total == 0 {
        return None;
    }

    let r = rng.random_range(0..total);
    let mut upto = 0;
    for action in valid_actions {
        upto += weight(action);
        if r < upto {
            return Some(*action);
        }
    }
    valid_actions.last().copied()
}

fn choose_action<R: Rng>(game: &Game, policy: Policy, rng: &mut R) -> Option<Action> {
    let can_draw = !game.stock().is_empty() || !game.waste().is_empty();
    match policy {
        Policy::Hint => match game.find_hint() {
            Some(mv) => Some(Action::Move(mv)),
            None if can_draw => Some(Action::Draw),
            None => None,
        },
        Policy::Random => {
            let mut actions: Vec<Action> = game.legal_moves().into_iter().map(Action::Move).collect();
            if can_draw {
                actions.push(Action::Draw);
            }
            sample_action(&actions, rng)
        }
    }
}

/// Play a single game, returning whether it was won and how many steps it took
fn play_game(args: &Args) -> (bool, u32) {
    let config = GameConfig {
        undoable_draws: args.undoable_draws,
    };
    let mut game = Game::with_config(config);
    let mut rng = rand::rng();
    let mut steps = 0;

    while steps < args.max_steps {
        if game.check_win() {
            log::info!("game won in {} steps", steps);
            return (true, steps);
        }

        let action = match choose_action(&game, args.policy, &mut rng) {
            Some(action) => action,
            None => {
                log::info!("no more valid actions after {} steps, game lost", steps);
                return (false, steps);
            }
        };

        match action {
            Action::Draw => {
                if game.draw_from_stock() == StockAction::Empty {
                    return (false, steps);
                }
            }
            Action::Move(mv) => {
                if let Err(e) = game.apply_move(&mv) {
                    log::warn!("engine rejected {}: {}", mv, e);
                    return (false, steps);
                }
            }
        }

        steps += 1;

        if args.print_interval > 0 && steps % args.print_interval == 0 {
            println!("\n=== Game state at step {} ===", steps);
            println!("Foundations filled: {}/52", game.foundation().size());
            print!("{}", game);
            println!("Last action: {:?}", action);
            println!("{}", "=".repeat(40));
        }

        if steps % 100 == 0 {
            log::debug!("step {}, foundations filled: {}/52", steps, game.foundation().size());
        }
    }

    log::info!("reached maximum steps ({}), game lost", args.max_steps);
    (false, steps)
}

/// Play multiple games and report statistics
fn play_multiple_games(args: &Args) {
    let num_games = args.games;
    let wins = Arc::new(Mutex::new(0u32));
    let total_steps = Arc::new(Mutex::new(0u64));
    let games_completed = Arc::new(Mutex::new(0u32));

    let start_time = Instant::now();

    let num_threads = if args.threads == 0 {
        thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
    } else {
        args.threads
    };
    let num_threads = std::cmp::max(1, std::cmp::min(num_threads, num_games as usize));
    let games_per_thread = (num_games as usize).div_ceil(num_threads);

    println!("Running {} games using {} threads", num_games, num_threads);

    thread::scope(|scope| {
        for thread_id in 0..num_threads {
            let start_game = thread_id * games_per_thread;
            let end_game = std::cmp::min((thread_id + 1) * games_per_thread, num_games as usize);
            if start_game >= end_game {
                continue;
            }

            let wins = Arc::clone(&wins);
            let total_steps = Arc::clone(&total_steps);
            let games_completed = Arc::clone(&games_completed);

            scope.spawn(move || {
                for _ in start_game..end_game {
                    let (win, steps) = play_game(args);

                    if win {
                        *wins.lock().expect("wins lock poisoned") += 1;
                    }
                    *total_steps.lock().expect("steps lock poisoned") += steps as u64;

                    let mut completed = games_completed.lock().expect("progress lock poisoned");
                    *completed += 1;
                    if *completed % 10 == 0 || *completed == num_games {
                        print!("Completed {}/{} games...\r", *completed, num_games);
                        let _ = io::stdout().flush();
                    }
                }
            });
        }
    });

    let wins = *wins.lock().expect("wins lock poisoned");
    let total_steps = *total_steps.lock().expect("steps lock poisoned");

    let duration = start_time.elapsed();
    let win_rate = (wins as f64 / num_games as f64) * 100.0;
    let avg_steps = total_steps as f64 / num_games as f64;

    println!("\nResults from {} games:", num_games);
    println!("Win rate: {:.2}% ({}/{})", win_rate, wins, num_games);
    println!("Average steps per game: {:.2}", avg_steps);
    println!(
        "Time taken: {:.2} seconds ({:.4} seconds per game)",
        duration.as_secs_f64(),
        duration.as_secs_f64() / num_games as f64
    );
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if args.games <= 1 {
        let (win, steps) = play_game(&args);
        println!("Game {} after {} steps", if win { "won" } else { "lost" }, steps);
    } else {
        play_multiple_games(&args);
    }
}
