//! Store, bank, hospital and saloon.
//!
//! Each service is a plain function over [`PlayerState`], the town itself keeps no state: bank
//! rates are drawn fresh for every sale.

use core::ops::Range;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Balance needed to be let into the saloon at all.
pub const SALOON_ENTRY_MONEY: Money = 5_000;

/// Balance needed to watch the show, it is never charged.
pub const SALOON_AUDIENCE_MONEY: Money = 10_000;

/// Hospital price per missing health point.
pub const HEAL_COST_PER_POINT: Money = 2;

/// Buys `equipment` unless already owned, in which case nothing is charged.
pub fn buy_equipment(player: &mut PlayerState, equipment: Equipment) -> bool {
    if player.has_equipment(equipment) {
        log::debug!("Already own {}", equipment.name());
        return false;
    }
    if !player.spend_money(equipment.price()) {
        log::debug!("Cannot afford {} for {}", equipment.name(), equipment.price());
        return false;
    }
    player.add_equipment(equipment);
    log::debug!("Bought {}", equipment.name());
    true
}

/// Bank rate range per mineral, `None` for fixed-price minerals.
pub const fn market_range(mineral: Mineral) -> Option<Range<f64>> {
    match mineral {
        Mineral::Silver => Some(9.0..20.0),
        Mineral::Gold => Some(45.0..63.0),
        Mineral::Platinum => Some(225.0..279.0),
        Mineral::Diamonds => None,
    }
}

const DIAMOND_PRICE: f64 = 1000.0;

/// Sells every mineral at freshly drawn rates, returns what the player was paid.
pub fn sell_minerals<R: RandomSource>(player: &mut PlayerState, rng: &mut R) -> Money {
    if !player.has_any_minerals() {
        return 0;
    }

    let mut total: Money = 0;
    for (mineral, count) in player.minerals().iter() {
        let rate = match market_range(mineral) {
            Some(range) => rng.uniform(range.start, range.end),
            None => DIAMOND_PRICE,
        };
        if count > 0 {
            // each mineral is truncated on its own before summing
            let value = (f64::from(count) * rate) as Money;
            log::trace!("Sold {} {} at {:.2}: {}", count, mineral.name(), rate, value);
            total += value;
        }
    }

    player.add_money(total);
    player.clear_minerals();
    log::debug!("Bank paid {}", total);
    total
}

/// What a full heal would cost right now.
pub fn heal_cost(player: &PlayerState) -> Money {
    Money::from(player.max_health() - player.health()) * HEAL_COST_PER_POINT
}

/// Heals to full or not at all.
pub fn heal_player(player: &mut PlayerState) -> bool {
    if !player.is_hurt() {
        return false;
    }

    let cost = heal_cost(player);
    if player.spend_money(cost) {
        player.heal(player.max_health() - player.health());
        log::debug!("Healed to full for {}", cost);
        true
    } else {
        false
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaloonOption {
    Audience,
    Night,
}

impl FromStr for SaloonOption {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "audience" => Ok(Self::Audience),
            "night" => Ok(Self::Night),
            other => Err(GameError::UnknownSaloonOption(other.into())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaloonOutcome {
    /// Not enough money to be served, nothing happened.
    Refused { required: Money },
    Enjoyed { healed: Health },
    Penalized { damage: Health },
    InvalidOption,
}

impl SaloonOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Enjoyed { .. } | Self::Penalized { .. })
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Refused { required } if required >= SALOON_AUDIENCE_MONEY => {
                "The show is only for those with $10000"
            }
            Self::Refused { .. } => "The doorman wants to see $5000 first",
            Self::Enjoyed { .. } => "What a night, you feel better",
            Self::Penalized { .. } => "You wake up feeling awful",
            Self::InvalidOption => "The saloon offers no such thing",
        }
    }
}

/// Takes a textual option as typed by the player, unknown options are reported, not errors.
pub fn saloon_interaction(player: &mut PlayerState, option: &str) -> SaloonOutcome {
    if player.money() < SALOON_ENTRY_MONEY {
        return SaloonOutcome::Refused {
            required: SALOON_ENTRY_MONEY,
        };
    }

    match option.parse() {
        Ok(option) => visit_saloon(player, option),
        Err(err) => {
            log::debug!("{}", err);
            SaloonOutcome::InvalidOption
        }
    }
}

pub fn visit_saloon(player: &mut PlayerState, option: SaloonOption) -> SaloonOutcome {
    use SaloonOutcome::*;

    if player.money() < SALOON_ENTRY_MONEY {
        return Refused {
            required: SALOON_ENTRY_MONEY,
        };
    }

    match option {
        SaloonOption::Audience if player.money() >= SALOON_AUDIENCE_MONEY => {
            player.heal(2);
            Enjoyed { healed: 2 }
        }
        SaloonOption::Audience => Refused {
            required: SALOON_AUDIENCE_MONEY,
        },
        SaloonOption::Night if player.has_equipment(Equipment::Shovel) => {
            player.heal(10);
            Enjoyed { healed: 10 }
        }
        SaloonOption::Night => {
            player.take_damage(20);
            Penalized { damage: 20 }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState::from_rules(&GameRules::default())
    }

    fn rich_player(money: Money) -> PlayerState {
        let mut player = player();
        player.add_money(money - player.money());
        player
    }

    #[test]
    fn buying_twice_charges_once() {
        let mut player = player();

        assert!(buy_equipment(&mut player, Equipment::Drill));
        assert!(!buy_equipment(&mut player, Equipment::Drill));

        assert_eq!(player.money(), 1250);
        assert!(player.has_equipment(Equipment::Drill));
    }

    #[test]
    fn cannot_buy_without_money() {
        let mut player = rich_player(99);

        assert!(!buy_equipment(&mut player, Equipment::Shovel));
        assert_eq!(player.money(), 99);
        assert!(!player.has_equipment(Equipment::Shovel));
    }

    #[test]
    fn selling_nothing_draws_no_rates() {
        let mut player = player();
        let mut rng = ScriptedRandom::new().with_units([0.5]);

        assert_eq!(sell_minerals(&mut player, &mut rng), 0);
        assert_eq!(player.money(), 1500);
        assert!(!rng.is_exhausted());
    }

    #[test]
    fn silver_sells_within_its_range() {
        for seed in 0..50 {
            let mut player = player();
            player.add_mineral("silver", 10);

            let total = sell_minerals(&mut player, &mut SeededRandom::new(seed));

            assert!((90..200).contains(&total), "total {total}");
            assert_eq!(player.money(), 1500 + total);
            assert!(player.minerals().is_empty());
        }
    }

    #[test]
    fn each_mineral_is_truncated_separately() {
        let mut player = player();
        player.add_mineral("silver", 1);
        player.add_mineral("gold", 1);
        player.add_mineral("platinum", 1);
        player.add_mineral("diamonds", 2);

        // silver 9.55, gold 54.9, platinum 252.0
        let mut rng = ScriptedRandom::new().with_units([0.05, 0.55, 0.5]);

        assert_eq!(sell_minerals(&mut player, &mut rng), 9 + 54 + 252 + 2000);
    }

    #[test]
    fn healing_at_full_health_is_refused() {
        let mut player = player();

        assert!(!heal_player(&mut player));
        assert_eq!(player.money(), 1500);
    }

    #[test]
    fn healing_costs_two_per_point() {
        let mut player = player();
        player.take_damage(35);

        assert_eq!(heal_cost(&player), 70);
        assert!(heal_player(&mut player));
        assert_eq!(player.health(), 100);
        assert_eq!(player.money(), 1430);
    }

    #[test]
    fn no_partial_heal_when_broke() {
        let mut player = rich_player(10);
        player.take_damage(50);

        assert!(!heal_player(&mut player));
        assert_eq!(player.health(), 50);
        assert_eq!(player.money(), 10);
    }

    #[test]
    fn saloon_turns_away_the_poor() {
        let mut player = player();
        player.take_damage(10);

        assert_eq!(
            saloon_interaction(&mut player, "night"),
            SaloonOutcome::Refused { required: 5000 }
        );
        assert_eq!(
            saloon_interaction(&mut player, "karaoke"),
            SaloonOutcome::Refused { required: 5000 }
        );
        assert_eq!(player.health(), 90);
    }

    #[test]
    fn audience_checks_money_without_charging() {
        let mut player = rich_player(9_999);
        player.take_damage(10);
        assert_eq!(
            saloon_interaction(&mut player, "audience"),
            SaloonOutcome::Refused { required: 10_000 }
        );

        let mut player = rich_player(10_000);
        player.take_damage(10);
        assert_eq!(
            saloon_interaction(&mut player, "Audience"),
            SaloonOutcome::Enjoyed { healed: 2 }
        );
        assert_eq!(player.health(), 92);
        assert_eq!(player.money(), 10_000);
    }

    #[test]
    fn night_depends_on_the_shovel() {
        let mut player = rich_player(6_000);
        assert_eq!(
            saloon_interaction(&mut player, "night"),
            SaloonOutcome::Penalized { damage: 20 }
        );
        assert_eq!(player.health(), 80);

        player.add_equipment(Equipment::Shovel);
        assert_eq!(
            saloon_interaction(&mut player, "night"),
            SaloonOutcome::Enjoyed { healed: 10 }
        );
        assert_eq!(player.health(), 90);
    }

    #[test]
    fn saloon_options_parse_case_insensitively() {
        assert_eq!(" NIGHT ".parse::<SaloonOption>(), Ok(SaloonOption::Night));
        assert_eq!(
            "Poker".parse::<SaloonOption>(),
            Err(GameError::UnknownSaloonOption("poker".into()))
        );
    }

    #[test]
    fn unknown_option_changes_nothing() {
        let mut player = rich_player(6_000);
        let before = player.clone();

        assert_eq!(
            saloon_interaction(&mut player, "poker"),
            SaloonOutcome::InvalidOption
        );
        assert_eq!(player, before);
    }
}
