//! blackwell CLI - Command-line front end for the addition-game solver
//!
//! Every subcommand calls into the engine and only formats its results.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{info, LevelFilter};

use blackwell_engine::verify::{sweep, Check};
use blackwell_engine::{
    simulate, winner_grid, Comparison, Game, GameParams, Player, PolicyKind, Solution,
    StrategyPlan, LOSS,
};
use blackwell_tree::build_tree;
use blackwell_tree::node::{GameTree, Node, NodeId};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Solve and verify Blackwell's addition game",
    long_about = None
)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Clone, Copy)]
struct GameArgs {
    /// Largest number a player may add
    #[arg(short, default_value_t = 3, allow_negative_numbers = true)]
    k: i64,
    /// Threshold; the player who exceeds it loses
    #[arg(short, default_value_t = 10, allow_negative_numbers = true)]
    n: i64,
}

impl GameArgs {
    fn params(self) -> Result<GameParams> {
        GameParams::from_signed(self.k, self.n).context("invalid game parameters")
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Print the Bellman value and policy tables")]
    Solve {
        #[command(flatten)]
        game: GameArgs,
    },
    #[command(about = "Check DP, closed form, minimax and alpha-beta against each other")]
    Verify {
        /// Largest k in the closed-form sweep (from k=2)
        #[arg(long, default_value_t = 7)]
        max_k: usize,
        /// Largest N in the closed-form sweep (from N=1)
        #[arg(long, default_value_t = 50)]
        max_n: usize,
        /// Largest N in the tree-search sweep
        #[arg(long, default_value_t = 14)]
        search_max_n: usize,
    },
    #[command(about = "Compare values and node counts of every method")]
    Compare {
        #[command(flatten)]
        game: GameArgs,
    },
    #[command(about = "Show who wins from the start for a range of k and N")]
    Grid {
        #[arg(long, default_value_t = 6)]
        max_k: usize,
        #[arg(long, default_value_t = 25)]
        max_n: usize,
    },
    #[command(about = "Play one game with the given policies", alias = "sim")]
    Simulate {
        #[command(flatten)]
        game: GameArgs,
        /// Player I policy: optimal or worst
        #[arg(long, default_value = "optimal")]
        p1: String,
        /// Player II policy: optimal or worst
        #[arg(long, default_value = "optimal")]
        p2: String,
    },
    #[command(about = "Explain the complement-to-(k+1) strategy and play it out")]
    Strategy {
        #[command(flatten)]
        game: GameArgs,
    },
    #[command(about = "Print the complete game tree for small parameters")]
    Tree {
        #[command(flatten)]
        game: GameArgs,
        /// Refuse to build trees with more nodes than this
        #[arg(long, default_value_t = 2_000)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Solve { game } => print_table(&Solution::compute(game.params()?)),
        Command::Verify {
            max_k,
            max_n,
            search_max_n,
        } => run_verify(max_k, max_n, search_max_n)?,
        Command::Compare { game } => print_comparison(&Comparison::run(game.params()?)),
        Command::Grid { max_k, max_n } => print_grid(max_k, max_n)?,
        Command::Simulate { game, p1, p2 } => {
            let params = game.params()?;
            let p1: PolicyKind = p1.parse()?;
            let p2: PolicyKind = p2.parse()?;
            let game = simulate(params.k(), params.n(), p1, p2)?;
            print_game(&game, p1, p2);
        }
        Command::Strategy { game } => print_strategy(game.params()?),
        Command::Tree { game, limit } => {
            let solution = Solution::compute(game.params()?);
            let tree = build_tree(&solution, limit)?;
            print_tree(&tree, 0, 0, false);
        }
    }
    Ok(())
}

fn print_table(solution: &Solution) {
    let params = solution.params();
    println!("Bellman value table: {params}");
    println!(
        "k+1 = {}, N mod (k+1) = {}",
        params.period(),
        params.n() % params.period()
    );
    println!();
    println!(
        "{:>5} | {:>5} | {:>9} | {:>15} | Result",
        "s", "V(s)", "Optimal i", "(N-s) mod (k+1)"
    );
    println!("{}", "-".repeat(56));
    for (s, &v) in solution.values().iter().enumerate() {
        let r = (params.n() - s) % params.period();
        let result = if v == LOSS { "LOSE (L)" } else { "WIN  (W)" };
        let choice = solution
            .best_move(s)
            .map_or_else(|| "any*".to_string(), |i| i.to_string());
        println!("{s:>5} | {v:>+5} | {choice:>9} | {r:>15} | {result}");
    }
    println!();
    println!("* At s=N, all moves bust; any choice loses.");
    println!("Losing positions: {:?}", solution.losing_positions());
}

fn run_verify(max_k: usize, max_n: usize, search_max_n: usize) -> Result<()> {
    if max_k < 2 {
        bail!("--max-k must be at least 2");
    }
    let closed = sweep(2..=max_k, 1..=max_n, Check::ClosedForm)?;
    println!(
        "DP matches closed form: {} cases (k=2..={max_k}, N=1..={max_n}), {} states",
        closed.cells, closed.comparisons
    );
    let searches = sweep(1..=max_k, 0..=search_max_n, Check::Searches)?;
    println!(
        "minimax == alpha-beta == V(0): {} cases (k=1..={max_k}, N=0..={search_max_n})",
        searches.cells
    );
    info!("all verification sweeps passed");
    Ok(())
}

fn print_comparison(cmp: &Comparison) {
    println!("Method comparison: {}", cmp.params);
    println!();
    println!("{:<28}| {:>5} | {:>14}", "Method", "Value", "Explored");
    println!("{}", "-".repeat(52));
    println!(
        "{:<28}| {:>+5} | {:>7} states",
        "Bellman DP (backward ind.)", cmp.dp_value, cmp.dp_states
    );
    println!(
        "{:<28}| {:>+5} | {:>8} nodes",
        "Minimax tree search", cmp.minimax.value, cmp.minimax.nodes_visited
    );
    println!(
        "{:<28}| {:>+5} | {:>8} nodes",
        "Alpha-beta pruning", cmp.alpha_beta.value, cmp.alpha_beta.nodes_visited
    );
    println!("{:<28}| {:>+5} | {:>14}", "Closed form", cmp.closed_form, "n/a");
    println!();
    if cmp.all_agree() {
        println!("All methods agree: Player {} wins", cmp.winner());
    } else {
        println!("{}", "Methods DISAGREE".red().bold());
    }
    if let Some(saved) = cmp.pruning_savings() {
        println!(
            "Alpha-beta pruning saved {:.1}% of nodes vs plain minimax",
            saved * 100.0
        );
    }
}

fn print_grid(max_k: usize, max_n: usize) -> Result<()> {
    if max_k < 2 || max_n < 1 {
        bail!("grid needs --max-k >= 2 and --max-n >= 1");
    }
    let grid = winner_grid(2..=max_k, 1..=max_n)?;
    println!("Who wins from the start ('II' = Player II, '.' = Player I)");
    print!("{:>5}", "k\\N");
    for n in 1..=max_n {
        print!(" {n:>2}");
    }
    println!();
    for (row, k) in grid.iter().zip(2..=max_k) {
        print!("{:>5}", format!("k={k}"));
        for winner in row {
            match winner {
                Player::II => print!(" {}", "II".red().bold()),
                Player::I => print!("  ."),
            }
        }
        println!("    (loses when {} | N)", k + 1);
    }
    Ok(())
}

fn print_game(game: &Game, p1: PolicyKind, p2: PolicyKind) {
    let params = game.params;
    println!("Game {params}: Player I [{p1}] vs Player II [{p2}]");
    for (idx, ply) in game.trajectory.iter().enumerate() {
        let head = format!(
            "Move {}: Player {:<2} at s={:>3}, V(s)={:+} -> picks {}, sum={:>3}",
            idx + 1,
            ply.mover,
            ply.sum_before,
            ply.value_before,
            ply.choice,
            ply.sum_after
        );
        if ply.is_bust(params) {
            println!("{head} > {}  BUST", params.n());
        } else {
            println!("{head}");
        }
    }
    println!(
        "Player {} loses and pays 1 unit to Player {}.",
        game.loser,
        game.winner()
    );
}

fn print_strategy(params: GameParams) {
    let plan = StrategyPlan::new(params);
    let period = params.period();
    let targets: Vec<String> = plan.targets.iter().map(|t| t.to_string()).collect();
    println!("Strategy walkthrough: {params}");
    match plan.opening {
        None => {
            println!(
                "N = {} is divisible by k+1 = {period}: Player I starts in a losing position.",
                params.n()
            );
            println!("After Player I plays i, Player II answers {period} - i.");
        }
        Some(r) => {
            println!(
                "N mod (k+1) = {r}: Player I opens with {r}, then answers j with {period} - j."
            );
        }
    }
    println!("Player {} lands on: {}", plan.winner, targets.join(", "));
    println!(
        "Player {} eventually faces sum = {} and must bust.",
        plan.winner.opponent(),
        params.n()
    );
    println!();
    let solution = Solution::compute(params);
    let game =
        blackwell_engine::simulate::play(&solution, PolicyKind::Optimal, PolicyKind::Optimal);
    print_game(&game, PolicyKind::Optimal, PolicyKind::Optimal);
}

fn print_tree(tree: &GameTree, id: NodeId, depth: usize, optimal_edge: bool) {
    let indent = "|   ".repeat(depth);
    let star = if optimal_edge { " *" } else { "" };
    match tree.get(id) {
        Some(Node::Decision {
            mover,
            sum,
            value,
            optimal,
            children,
            via,
            ..
        }) => {
            let tag = if *value == LOSS { "L" } else { "W" };
            let edge = via.map_or_else(String::new, |i| format!("pick {i} -> "));
            let note = if optimal.is_none() { "  <- forced bust" } else { "" };
            println!("{indent}{edge}s={sum} (P{mover}) V={value:+} [{tag}]{star}{note}");
            for &child in children {
                let on_policy = tree.get(child).and_then(Node::via) == *optimal;
                print_tree(tree, child, depth + 1, on_policy);
            }
        }
        Some(Node::Bust {
            via,
            loser,
            sum,
            ..
        }) => {
            println!(
                "{indent}pick {via} -> s={sum} BUST (Player {} wins){star}",
                loser.opponent()
            );
        }
        None => {}
    }
}
