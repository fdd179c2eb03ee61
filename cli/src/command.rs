use anyhow::{Context, bail};
use core::str::FromStr;
use miner_core::{Direction, Equipment};

/// One line of player input.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Buy(Equipment),
    Store,
    Sell,
    Heal,
    Saloon(String),
    Enter,
    Leave,
    Move(Direction),
    Surface,
    Restart,
    Status,
    Map,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("Empty command");
        };
        let arg = words.next();
        if let Some(extra) = words.next() {
            bail!("Unexpected argument: {extra}");
        }

        let verb = verb.to_ascii_lowercase();
        let command = match (verb.as_str(), arg) {
            ("buy", Some(item)) => Self::Buy(item.parse()?),
            ("buy", None) => bail!("Buy what? Try `store` to see the shelf"),
            ("store", None) => Self::Store,
            ("sell", None) => Self::Sell,
            ("heal", None) => Self::Heal,
            ("saloon", option) => Self::Saloon(
                option
                    .map(str::to_owned)
                    .context("The saloon offers `audience` or `night`")?,
            ),
            ("enter", None) => Self::Enter,
            ("leave", None) => Self::Leave,
            ("surface", None) => Self::Surface,
            ("restart", None) => Self::Restart,
            ("status", None) => Self::Status,
            ("map", None) => Self::Map,
            ("help" | "?", None) => Self::Help,
            ("quit" | "exit", None) => Self::Quit,
            (_, None) => Self::Move(verb.parse()?),
            (_, Some(arg)) => bail!("Unexpected argument: {arg}"),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
commands:
  store                 list equipment and prices
  buy <equipment>       buy from the store
  sell                  sell every mineral at today's rates
  heal                  heal to full at the hospital
  saloon <option>       audience or night
  enter / leave         go down the mine or back to town
  up down left right    move or dig (also w s a d)
  surface               jump up to the surface row
  restart               start a new game
  status / map          show the player or the visible mine
  quit";
