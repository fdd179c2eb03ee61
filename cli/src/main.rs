use anyhow::Context;
use clap::Parser;
use miner_core::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

mod command;

use command::{Command, HELP};

#[derive(Parser, Debug)]
#[command(version, about = "Dig for minerals and the lost ring", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file overriding the default rules
    #[arg(short, long)]
    rules: Option<PathBuf>,
}

fn load_rules(path: Option<&Path>) -> anyhow::Result<GameRules> {
    let Some(path) = path else {
        return Ok(GameRules::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read rules from {}", path.display()))?;
    let rules = toml::from_str(&text)
        .with_context(|| format!("Could not parse rules in {}", path.display()))?;
    Ok(rules)
}

fn status_line(session: &GameSession) -> String {
    let player = session.player();
    let (x, y) = player.position();
    let minerals = player
        .minerals()
        .iter()
        .filter(|&(_, count)| count > 0)
        .map(|(mineral, count)| format!("{count} {}", mineral.name()))
        .collect::<Vec<_>>();
    format!(
        "[{:?}] ${} hp {}/{} at ({x},{y}){}{}",
        session.screen(),
        player.money(),
        player.health(),
        player.max_health(),
        if player.has_ring() { " +ring" } else { "" },
        if minerals.is_empty() {
            String::new()
        } else {
            format!(" carrying {}", minerals.join(", "))
        },
    )
}

fn render_map(session: &GameSession) -> String {
    let (width, _) = session.field().size();
    let position = session.player().position();
    let mut out = String::new();
    for y in session.visible_rows() {
        for x in 0..width {
            let glyph = if (x, y) == position {
                'X'
            } else {
                session.appearance((x, y)).glyph()
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn render_store(session: &GameSession) -> String {
    Equipment::ALL
        .iter()
        .map(|&item| {
            let owned = if session.player().has_equipment(item) {
                " (owned)"
            } else {
                ""
            };
            format!("  {:<9} ${:<4} {}{owned}", item.name(), item.price(), item.description())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_move(outcome: MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Blocked(BlockReason::OutOfBounds) => "Solid rock, no way through".into(),
        MoveOutcome::Blocked(BlockReason::MissingEquipment(item)) => {
            format!("You need a {} for that", item.name())
        }
        MoveOutcome::Blocked(BlockReason::InsufficientFunds { cost }) => {
            format!("Digging there costs ${cost}")
        }
        MoveOutcome::MovedToEmpty(_) => String::new(),
        MoveOutcome::Dug(report) => {
            let mut notes = vec![format!("Dug {:?} for ${}", report.tile, report.cost)];
            match report.reward {
                Some(Reward::Mineral { mineral, amount }) => {
                    notes.push(format!("found {amount} {}", mineral.name()))
                }
                Some(Reward::Ring) => notes.push("found the ring!".into()),
                None => {}
            }
            if report.flooded {
                notes.push("water floods in".into());
            }
            if let Some(side) = report.cave_in {
                notes.push(format!("a {side}x{side} cave-in"));
            }
            if report.damage > 0 {
                notes.push(format!("lost {} hp", report.damage));
            }
            notes.join(", ")
        }
    }
}

/// Applies one command, returns what to tell the player.
fn execute(session: &mut GameSession, command: Command) -> Result<String> {
    let message = match command {
        Command::Buy(item) => {
            if session.buy_equipment(item)? {
                format!("Bought the {}", item.name())
            } else if session.player().has_equipment(item) {
                format!("You already own a {}", item.name())
            } else {
                format!("The {} costs ${}", item.name(), item.price())
            }
        }
        Command::Store => render_store(session),
        Command::Sell => format!("The bank paid ${}", session.sell_minerals()?),
        Command::Heal => {
            if session.heal()? {
                "Good as new".into()
            } else {
                "The doctor turns you away".into()
            }
        }
        Command::Saloon(option) => session.saloon(&option)?.message().into(),
        Command::Enter => {
            if session.enter_mine()? {
                "Down the shaft you go".into()
            } else {
                format!("The entry fee is ${}", session.rules().mine_entry_fee)
            }
        }
        Command::Leave => {
            session.leave_mine()?;
            "Back in town".into()
        }
        Command::Move(direction) => describe_move(session.move_player(direction)?),
        Command::Surface => {
            let (x, y) = session.return_to_surface()?;
            format!("Climbed up to ({x},{y})")
        }
        Command::Restart => {
            session.restart();
            "A new mine awaits".into()
        }
        Command::Map => render_map(session),
        Command::Status => String::new(),
        Command::Help => HELP.into(),
        Command::Quit => "Bye".into(),
    };
    Ok(message)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let rules = load_rules(args.rules.as_deref())?;
    let rng = match args.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    log::debug!("seed: {:?}", args.seed);
    let mut session = GameSession::new(rules, rng)?;

    println!("{HELP}");
    println!("{}", status_line(&session));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match execute(&mut session, command) {
            Ok(message) if !message.is_empty() => println!("{message}"),
            Ok(_) => {}
            Err(err) => println!("{err}"),
        }

        let before = session.screen();
        match session.update() {
            screen if screen == before => {}
            GameScreen::Victory => println!("You made it: rich and reunited with the ring!"),
            GameScreen::GameOver => println!("Game over, `restart` to try again"),
            _ => {}
        }
        println!("{}", status_line(&session));
        stdout.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(GameRules::default(), SeededRandom::new(1)).unwrap()
    }

    #[test]
    fn status_line_summarizes_the_player() {
        assert_eq!(status_line(&session()), "[Town] $1500 hp 100/100 at (19,0)");
    }

    #[test]
    fn map_shows_the_viewport_with_the_player() {
        let map = render_map(&session());
        let rows = map.lines().collect::<Vec<_>>();

        assert_eq!(rows.len(), 34);
        assert!(rows.iter().all(|row| row.chars().count() == 39));
        assert_eq!(rows[0].chars().nth(19), Some('X'));
    }

    #[test]
    fn wrong_screen_is_reported_not_fatal() {
        let mut session = session();

        assert!(execute(&mut session, Command::Move(Direction::Down)).is_err());
        assert_eq!(
            execute(&mut session, Command::Enter).unwrap(),
            "Down the shaft you go"
        );
        assert_eq!(session.player().money(), 1470);
    }

    #[test]
    fn rules_file_overrides_only_given_fields() {
        let rules: GameRules = toml::from_str("starting_money = 40\nsize = [20, 60]").unwrap();

        assert_eq!(rules.starting_money, 40);
        assert_eq!(rules.size, (20, 60));
        assert_eq!(rules.max_health, 100);
        assert_eq!(load_rules(None).unwrap(), GameRules::default());
    }
}
