use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use host::render::render_episode;
use host::{parse_moves, verify_seeded_path, GameConfig, GameSession};
use maze_core::{Direction, MoveOutcome, DEFAULT_COLS, DEFAULT_ROWS};

#[derive(Parser, Debug)]
#[command(name = "maze", version, about = "Perfect-maze generator and terminal maze game")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play in the terminal: type up/down/left/right (or wasd), r to reset, q to quit
    Play(MazeArgs),

    /// Generate a maze and print it with its seed, start, and exit
    Generate(MazeArgs),

    /// Replay moves against the maze a seed describes
    Verify {
        /// Number of columns in the maze
        #[arg(long, default_value_t = DEFAULT_COLS)]
        width: usize,

        /// Number of rows in the maze
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        height: usize,

        /// Seed printed by `generate` or `play`
        #[arg(long)]
        seed: u32,

        /// Move codes (0=NORTH, 1=EAST, 2=SOUTH, 3=WEST) or direction words
        #[arg(required = true)]
        moves: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct MazeArgs {
    /// Number of columns in the maze
    #[arg(long, default_value_t = DEFAULT_COLS)]
    width: usize,

    /// Number of rows in the maze
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    height: usize,

    /// Seed for a reproducible maze; random when omitted
    #[arg(long)]
    seed: Option<u32>,
}

impl From<MazeArgs> for GameConfig {
    fn from(args: MazeArgs) -> Self {
        GameConfig {
            width: args.width,
            height: args.height,
            seed: args.seed,
        }
    }
}

fn main() -> ExitCode {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Play(args) => play_command(args.into()),
        Command::Generate(args) => generate_command(args.into()),
        Command::Verify {
            width,
            height,
            seed,
            moves,
        } => verify_command(width, height, seed, &moves),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn play_command(config: GameConfig) -> anyhow::Result<()> {
    let mut session = GameSession::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    draw(&session);
    prompt(&mut stdout, &session)?;

    for line in stdin.lock().lines() {
        let line = line.context("reading input")?;
        for word in line.split_whitespace() {
            match word.to_ascii_lowercase().as_str() {
                "q" | "quit" | "exit" => return Ok(()),
                "r" | "reset" => session.reset()?,
                other => match other.parse::<Direction>() {
                    Ok(dir) => {
                        if session.try_move(dir) == MoveOutcome::Blocked {
                            println!("🧱 A wall blocks the way {}", dir);
                        }
                    }
                    Err(e) => println!("❓ {}", e),
                },
            }
        }

        draw(&session);
        if session.is_finished() {
            println!(
                "🎉 Congratulations! You reached the exit in {}s ({} moves)",
                session.elapsed().as_secs(),
                session.episode().moves()
            );
            println!("   Type r for a new maze or q to quit.");
        }
        prompt(&mut stdout, &session)?;
    }

    Ok(())
}

fn draw(session: &GameSession) {
    println!();
    print!("{}", render_episode(session.episode()));
    println!(
        "Time: {}s   Moves: {}   Seed: {}",
        session.elapsed().as_secs(),
        session.episode().moves(),
        session.seed()
    );
}

fn prompt(stdout: &mut io::Stdout, session: &GameSession) -> anyhow::Result<()> {
    if !session.is_finished() {
        print!("move> ");
    } else {
        print!("> ");
    }
    stdout.flush()?;
    Ok(())
}

fn generate_command(config: GameConfig) -> anyhow::Result<()> {
    let session = GameSession::new(config)?;
    let snapshot = session.snapshot();

    print!("{}", render_episode(session.episode()));
    println!();
    println!("✅ Maze generated");
    println!("  Seed: {}", snapshot.seed);
    println!("  Size: {}x{} cells", snapshot.width, snapshot.height);
    println!("  Start: {}", snapshot.start);
    println!("  Exit: {}", snapshot.exit);
    Ok(())
}

fn verify_command(width: usize, height: usize, seed: u32, moves: &[String]) -> anyhow::Result<()> {
    let moves = parse_moves(&moves.join(" "))?;
    println!("📦 Maze seed: {} ({}x{})", seed, width, height);
    println!("📦 Parsed {} moves", moves.len());
    println!("  First 20 moves: {:?}", &moves[..20.min(moves.len())]);

    let report = verify_seeded_path(width, height, seed, &moves)?;
    println!();
    println!("  Moves applied: {}", report.moves_applied);
    println!("  Final position: {}", report.final_position);
    println!("  Path valid: {}", if report.reached_exit { "Yes ✓" } else { "No ✗" });
    Ok(())
}
