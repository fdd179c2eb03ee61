use core::ops::Range;
use serde::{Deserialize, Serialize};

use crate::*;
use crate::town;

/// Which screen the game is on.
///
/// Valid transitions:
/// - Town -> Mine (paying the entry fee)
/// - Mine -> Town
/// - Town -> Victory
/// - Town | Mine -> GameOver
/// - any -> Town (restart)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameScreen {
    Town,
    Mine,
    GameOver,
    Victory,
}

impl GameScreen {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

impl Default for GameScreen {
    fn default() -> Self {
        Self::Town
    }
}

/// One game from start to restart: owns the field, the player and the dice.
#[derive(Clone, Debug)]
pub struct GameSession<R = SeededRandom> {
    rules: GameRules,
    field: MineField,
    player: PlayerState,
    screen: GameScreen,
    rng: R,
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(rules: GameRules, rng: R) -> Result<Self> {
        rules.validate()?;
        let mut session = Self {
            rules,
            field: MineField::from_rules(&rules),
            player: PlayerState::from_rules(&rules),
            screen: GameScreen::Town,
            rng,
        };
        session.generate_field();
        Ok(session)
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn field(&self) -> &MineField {
        &self.field
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn screen(&self) -> GameScreen {
        self.screen
    }

    /// Fresh player and a newly generated mine, back in town.
    pub fn restart(&mut self) {
        self.player = PlayerState::from_rules(&self.rules);
        self.generate_field();
        self.screen = GameScreen::Town;
        log::info!("Game restarted");
    }

    pub fn enter_mine(&mut self) -> Result<bool> {
        self.check_screen(GameScreen::Town)?;
        if !self.player.spend_money(self.rules.mine_entry_fee) {
            log::debug!("Cannot afford the mine entry fee");
            return Ok(false);
        }
        self.set_screen(GameScreen::Mine);
        Ok(true)
    }

    pub fn leave_mine(&mut self) -> Result<()> {
        self.check_screen(GameScreen::Mine)?;
        self.set_screen(GameScreen::Town);
        Ok(())
    }

    pub fn move_player(&mut self, direction: Direction) -> Result<MoveOutcome> {
        self.check_screen(GameScreen::Mine)?;
        let outcome = DigEngine::new(&mut self.field, &mut self.player, &mut self.rng)
            .with_cave_in_chance(self.rules.cave_in_chance)
            .attempt_move(direction);
        if outcome.has_moved() {
            self.follow_player();
        }
        Ok(outcome)
    }

    /// Jumps straight up to the surface row of the current column, clearing the landing cell.
    pub fn return_to_surface(&mut self) -> Result<Coord2> {
        self.check_screen(GameScreen::Mine)?;
        let (x, _) = self.player.position();
        let landing = (x, 0);
        self.field.set(landing, TileKind::Empty);
        self.field.reveal(landing);
        self.player.move_to(landing);
        self.follow_player();
        Ok(landing)
    }

    pub fn buy_equipment(&mut self, equipment: Equipment) -> Result<bool> {
        self.check_screen(GameScreen::Town)?;
        Ok(town::buy_equipment(&mut self.player, equipment))
    }

    pub fn sell_minerals(&mut self) -> Result<Money> {
        self.check_screen(GameScreen::Town)?;
        Ok(town::sell_minerals(&mut self.player, &mut self.rng))
    }

    pub fn heal(&mut self) -> Result<bool> {
        self.check_screen(GameScreen::Town)?;
        Ok(town::heal_player(&mut self.player))
    }

    pub fn saloon(&mut self, option: &str) -> Result<SaloonOutcome> {
        self.check_screen(GameScreen::Town)?;
        Ok(town::saloon_interaction(&mut self.player, option))
    }

    /// One tick of the win and loss checks, returns the screen afterwards.
    pub fn update(&mut self) -> GameScreen {
        match self.screen {
            GameScreen::Town if self.has_won() => self.set_screen(GameScreen::Victory),
            GameScreen::Town | GameScreen::Mine if self.has_lost() => {
                self.set_screen(GameScreen::GameOver)
            }
            _ => {}
        }
        self.screen
    }

    pub fn has_won(&self) -> bool {
        self.player.has_ring() && self.player.money() >= self.rules.victory_money
    }

    pub fn has_lost(&self) -> bool {
        self.player.health() <= 0 || self.player.money() < self.rules.debt_floor
    }

    /// The kind a front-end should draw at `coords`.
    pub fn appearance(&self, coords: Coord2) -> TileKind {
        self.field
            .appearance(coords, self.player.has_equipment(Equipment::Lantern))
    }

    /// Mine rows currently in view.
    pub fn visible_rows(&self) -> Range<Coord> {
        let top = self.player.camera().top();
        let bottom = top
            .saturating_add(self.rules.viewport_rows)
            .min(self.field.size().1);
        top..bottom
    }

    fn generate_field(&mut self) {
        self.field.generate(&mut self.rng);
        let start = self.rules.start_position();
        self.field.set(start, TileKind::Empty);
        self.field.reveal(start);
    }

    fn follow_player(&mut self) {
        let (_, y) = self.player.position();
        let (rows, margin) = (self.rules.viewport_rows, self.rules.camera_margin);
        self.player.camera_mut().follow(y, rows, margin);
    }

    fn set_screen(&mut self, screen: GameScreen) {
        if self.screen != screen {
            log::info!("Screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
    }

    fn check_screen(&self, expected: GameScreen) -> Result<()> {
        if self.screen.is_finished() {
            Err(GameError::AlreadyEnded)
        } else if self.screen != expected {
            Err(GameError::WrongScreen {
                expected,
                actual: self.screen,
            })
        } else {
            Ok(())
        }
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut MineField {
        &mut self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession<ScriptedRandom> {
        GameSession::new(GameRules::default(), ScriptedRandom::new()).unwrap()
    }

    #[test]
    fn new_session_starts_in_town_on_open_ground() {
        let session = session();

        assert_eq!(session.screen(), GameScreen::Town);
        let start = session.player().position();
        assert_eq!(start, (19, 0));
        assert_eq!(session.field().get(start), TileKind::Empty);
        assert!(session.field().is_revealed(start));
        assert_eq!(session.field().count(TileKind::Ring), 1);
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let rules = GameRules {
            size: (0, 10),
            ..Default::default()
        };
        assert!(matches!(
            GameSession::new(rules, ScriptedRandom::new()),
            Err(GameError::InvalidRules(_))
        ));
    }

    #[test]
    fn entering_the_mine_costs_the_fee() {
        let mut session = session();

        assert_eq!(session.enter_mine(), Ok(true));
        assert_eq!(session.screen(), GameScreen::Mine);
        assert_eq!(session.player().money(), 1470);
    }

    #[test]
    fn broke_player_stays_in_town() {
        let mut session = session();
        session.player_mut().spend_money(1480);

        assert_eq!(session.enter_mine(), Ok(false));
        assert_eq!(session.screen(), GameScreen::Town);
        assert_eq!(session.player().money(), 20);
    }

    #[test]
    fn actions_are_bound_to_their_screen() {
        let mut session = session();

        assert_eq!(
            session.move_player(Direction::Down),
            Err(GameError::WrongScreen {
                expected: GameScreen::Mine,
                actual: GameScreen::Town
            })
        );

        session.enter_mine().unwrap();
        assert!(session.buy_equipment(Equipment::Pick).is_err());
        assert!(session.heal().is_err());
        assert!(session.leave_mine().is_ok());
        assert_eq!(session.screen(), GameScreen::Town);
    }

    #[test]
    fn digging_moves_the_camera() {
        let mut session = session();
        session.player_mut().add_money(100_000);
        session.enter_mine().unwrap();

        for _ in 0..40 {
            let (x, y) = session.player().position();
            session.field_mut().set((x, y + 1), TileKind::Dirt);
            let outcome = session.move_player(Direction::Down).unwrap();
            assert!(outcome.has_moved());
        }

        assert_eq!(session.player().position(), (19, 40));
        assert_eq!(session.player().camera().top(), 9);
        assert_eq!(session.visible_rows(), 9..43);
    }

    #[test]
    fn surface_jump_clears_the_landing_cell() {
        let mut session = session();
        session.enter_mine().unwrap();
        session.move_player(Direction::Down).unwrap();
        session.move_player(Direction::Right).unwrap();
        session.field_mut().set((20, 0), TileKind::Granite);

        assert_eq!(session.return_to_surface(), Ok((20, 0)));
        assert_eq!(session.field().get((20, 0)), TileKind::Empty);
        assert_eq!(session.player().camera().top(), 0);
    }

    #[test]
    fn victory_needs_ring_and_money() {
        let mut session = session();
        session.player_mut().take_ring();
        session.player_mut().add_money(19_999 - 1500);

        assert_eq!(session.update(), GameScreen::Town);

        session.player_mut().add_money(1);
        assert_eq!(session.update(), GameScreen::Victory);
        assert_eq!(session.sell_minerals(), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn victory_is_only_checked_in_town() {
        let mut session = session();
        session.player_mut().take_ring();
        session.player_mut().add_money(30_000);
        session.enter_mine().unwrap();

        assert_eq!(session.update(), GameScreen::Mine);
        session.leave_mine().unwrap();
        assert_eq!(session.update(), GameScreen::Victory);
    }

    #[test]
    fn death_in_the_mine_ends_the_game() {
        let mut session = session();
        session.enter_mine().unwrap();
        session.player_mut().take_damage(100);

        assert_eq!(session.update(), GameScreen::GameOver);
        assert_eq!(
            session.move_player(Direction::Down),
            Err(GameError::AlreadyEnded)
        );
    }

    #[test]
    fn deep_debt_ends_the_game() {
        let mut session = session();
        session.player_mut().add_money(-1600);
        assert_eq!(session.update(), GameScreen::Town);

        session.player_mut().add_money(-1);
        assert_eq!(session.update(), GameScreen::GameOver);
    }

    #[test]
    fn restart_resets_player_and_field() {
        let mut session = session();
        session.enter_mine().unwrap();
        session.move_player(Direction::Down).unwrap();
        session.player_mut().take_damage(100);
        session.update();

        session.restart();

        assert_eq!(session.screen(), GameScreen::Town);
        assert_eq!(session.player(), &PlayerState::from_rules(&GameRules::default()));
        assert_eq!(session.field().get((19, 1)), TileKind::Dirt);
        assert!(!session.field().is_revealed((19, 1)));
    }

    #[test]
    fn lantern_shows_what_lies_ahead() {
        let mut session = session();
        session.field_mut().set((0, 3), TileKind::Gold);

        assert_eq!(session.appearance((0, 3)), TileKind::Dirt);
        session.player_mut().add_equipment(Equipment::Lantern);
        assert_eq!(session.appearance((0, 3)), TileKind::Gold);
    }
}
