use clap::Parser;
use log::{error, info};
use uno::uno_game::{ConsoleUI, GameConfig, GameController, UnoGame, HAND_SIZE, SCORE_TO_WIN};

/// Play simplified UNO in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Player name, in turn order. Repeat for each player; prompts when fewer than two.
    #[arg(short, long = "player")]
    players: Vec<String>,

    /// Seed for the card generator, for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Points needed to win the match
    #[arg(long, default_value_t = SCORE_TO_WIN)]
    target_score: u32,

    /// Cards dealt to each player at the start of a round
    #[arg(long, default_value_t = HAND_SIZE)]
    hand_size: usize,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));
    let args = Args::parse();
    info!("Starting Uno with {:?}", args);

    let game = UnoGame::with_config(GameConfig {
        hand_size: args.hand_size,
        target_score: args.target_score,
        seed: args.seed,
    });
    let mut controller = GameController::new(game, ConsoleUI::new());

    let result = controller
        .seat_players(args.players)
        .and_then(|_| controller.run());
    if let Err(e) = result {
        error!("Game aborted: {}", e);
        eprintln!("Failed to run game: {}", e);
        std::process::exit(1);
    }
}
