use anyhow::{Context, Result};
use game_tree::games::tic_tac_toe::TicTacToeState;
use game_tree::games::ultimate_tic_tac_toe::UltimateTicTacToeState;
use game_tree::{GameTreeNode, Player};
use game_tree_strategy::strategies::random::RandomStrategy;
use game_tree_strategy::strategies::search_tree::SearchTreeStrategy;
use game_tree_strategy::Strategy;
use log::LevelFilter;
use monte_carlo_tree_search::SearchConfig;
use std::fmt;
use std::io;
use structopt::StructOpt;
use strum_macros::EnumString;

mod human;
mod match_runner;
mod search_tree;

use self::match_runner::play_match;
use self::search_tree::SearchTreeIterationIterator;

#[derive(Debug, StructOpt)]
#[structopt(name = "compare-strategies", about = "A CLI tool to help compare game tree strategies.")]
struct Opt {
    /// Log more, repeat for even more (-v info, -vv debug, -vvv trace).
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Play a series of games between two strategies, alternating who starts.
    #[structopt(name = "compare")]
    Compare {
        #[structopt(short = "g", long = "game", default_value = "ultimate")]
        game: GameType,

        #[structopt(long = "first", default_value = "modified")]
        first: StrategyType,

        #[structopt(long = "second", default_value = "vanilla")]
        second: StrategyType,

        #[structopt(short = "n", long = "games", default_value = "100")]
        games: u32,

        #[structopt(flatten)]
        search: SearchOpt,
    },

    /// Grow search trees in steps for several exploration factors and score
    /// each step against random play.
    #[structopt(name = "sweep")]
    Sweep {
        #[structopt(short = "g", long = "game", default_value = "tictactoe")]
        game: GameType,

        #[structopt(short = "s", long = "strategy", default_value = "vanilla")]
        strategy: StrategyType,

        #[structopt(long = "step-iterations", default_value = "100")]
        step_iterations: u64,

        #[structopt(long = "steps", default_value = "30")]
        steps: usize,

        #[structopt(short = "n", long = "games", default_value = "100")]
        games: u32,

        #[structopt(flatten)]
        search: SearchOpt,
    },

    /// Play ultimate tic-tac-toe against a strategy from the terminal.
    #[structopt(name = "play")]
    Play {
        #[structopt(short = "b", long = "bot", default_value = "modified")]
        bot: StrategyType,

        /// Let the bot make the first move.
        #[structopt(long = "second")]
        human_second: bool,

        #[structopt(flatten)]
        search: SearchOpt,
    },
}

/// Overrides for the search presets.
#[derive(Debug, Clone, StructOpt)]
struct SearchOpt {
    /// Iterations per move.
    #[structopt(short = "i", long = "iterations")]
    iterations: Option<u64>,

    /// UCB exploration constant.
    #[structopt(short = "e", long = "exploration")]
    exploration: Option<f64>,

    #[structopt(short = "t", long = "threads")]
    threads: Option<usize>,

    #[structopt(long = "seed")]
    seed: Option<u64>,
}

impl SearchOpt {
    fn apply(&self, mut config: SearchConfig) -> SearchConfig {
        if let Some(iterations) = self.iterations {
            config.max_iterations = iterations;
        }
        if let Some(exploration) = self.exploration {
            config.exploration_factor = exploration;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        config.seed = self.seed.or(config.seed);
        config
    }
}

#[derive(Debug, Clone, Copy, EnumString)]
enum StrategyType {
    #[strum(serialize = "random")]
    Random,
    #[strum(serialize = "vanilla")]
    Vanilla,
    #[strum(serialize = "modified")]
    Modified,
}

impl StrategyType {
    fn search_config(self, search: &SearchOpt) -> Option<SearchConfig> {
        match self {
            StrategyType::Random => None,
            StrategyType::Vanilla => Some(search.apply(SearchConfig::vanilla())),
            StrategyType::Modified => Some(search.apply(SearchConfig::modified())),
        }
    }

    fn build<N: GameTreeNode<Node = N>>(self, search: &SearchOpt) -> Result<Box<dyn Strategy<N>>> {
        let config = match self.search_config(search) {
            Some(config) => config,
            None => {
                let random: Box<dyn Strategy<N>> = match search.seed {
                    Some(seed) => Box::new(RandomStrategy::seeded(seed)),
                    None => Box::new(RandomStrategy::new()),
                };
                return Ok(random);
            }
        };

        let strategy = SearchTreeStrategy::new(config)
            .with_context(|| format!("invalid search settings for {:?}", self))?;
        Ok(Box::new(strategy))
    }
}

#[derive(Debug, Clone, Copy, EnumString)]
enum GameType {
    #[strum(serialize = "tictactoe", serialize = "TicTacToe")]
    TicTacToe,
    #[strum(serialize = "ultimate", serialize = "UltimateTicTacToe")]
    UltimateTicTacToe,
}

trait StrategyIterator<N: GameTreeNode<Node = N>>:
    fmt::Display + Iterator<Item = Box<dyn Strategy<N>>>
{
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    simple_logging::log_to_stderr(level);

    match opt.command {
        Command::Compare {
            game,
            first,
            second,
            games,
            search,
        } => match game {
            GameType::TicTacToe => compare(TicTacToeState::new(), first, second, games, &search),
            GameType::UltimateTicTacToe => {
                compare(UltimateTicTacToeState::new(), first, second, games, &search)
            }
        },
        Command::Sweep {
            game,
            strategy,
            step_iterations,
            steps,
            games,
            search,
        } => {
            let sweep = Sweep {
                strategy,
                step_iterations,
                steps,
                games,
                search,
            };
            match game {
                GameType::TicTacToe => sweep.run(TicTacToeState::new()),
                GameType::UltimateTicTacToe => sweep.run(UltimateTicTacToeState::new()),
            }
        }
        Command::Play {
            bot,
            human_second,
            search,
        } => {
            let mut bot = bot.build::<UltimateTicTacToeState>(&search)?;
            let human = if human_second { Player::O } else { Player::X };
            let stdin = io::stdin();
            human::play_interactive(stdin.lock(), io::stdout(), bot.as_mut(), human)?;
            Ok(())
        }
    }
}

fn compare<N: GameTreeNode<Node = N>>(
    root: N,
    first: StrategyType,
    second: StrategyType,
    games: u32,
    search: &SearchOpt,
) -> Result<()> {
    let mut strategies = [first.build(search)?, second.build(search)?];
    let report = play_match(&root, &mut strategies, games);
    println!("{}", report);
    Ok(())
}

struct Sweep {
    strategy: StrategyType,
    step_iterations: u64,
    steps: usize,
    games: u32,
    search: SearchOpt,
}

impl Sweep {
    const EXPLORATION_FACTORS: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];
    const MOVE_ITERATIONS: u64 = 10;

    fn run<N: GameTreeNode<Node = N>>(&self, root: N) -> Result<()> {
        let base = self
            .strategy
            .search_config(&self.search)
            .context("sweeping needs a search strategy, not random")?;
        base.validate().context("invalid search settings")?;

        let strategy_iterators = Self::EXPLORATION_FACTORS
            .iter()
            .map(|&exploration_factor| {
                let config = SearchConfig {
                    exploration_factor,
                    ..base.clone()
                };
                Box::new(SearchTreeIterationIterator::new(
                    root.clone(),
                    config,
                    self.step_iterations,
                    Self::MOVE_ITERATIONS,
                    self.steps,
                )) as Box<dyn StrategyIterator<N>>
            })
            .collect::<Vec<_>>();

        for mut s_iterator in strategy_iterators {
            while let Some(strategy) = s_iterator.next() {
                let random: Box<dyn Strategy<N>> = match self.search.seed {
                    Some(seed) => Box::new(RandomStrategy::seeded(seed)),
                    None => Box::new(RandomStrategy::new()),
                };
                let mut strategies = [strategy, random];
                let report = play_match(&root, &mut strategies, self.games);
                println!("{} - {}", s_iterator, report);
            }
        }

        Ok(())
    }
}
