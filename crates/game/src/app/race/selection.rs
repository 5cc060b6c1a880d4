#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Player {
    One,
    Two,
}

impl Player {
    pub(crate) const ALL: [Player; 2] = [Player::One, Player::Two];

    pub(crate) fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Cart name shown in the HUD and logs.
    pub(crate) fn cart_name(self) -> &'static str {
        match self {
            Player::One => "Red",
            Player::Two => "Blue",
        }
    }
}

/// How a character box border is tinted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoxHighlight {
    Neutral,
    PlayerOne,
    PlayerTwo,
}

/// One-shot picks, Player One first. Two players may pick the same character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Selection {
    picks: [Option<usize>; 2],
}

impl Selection {
    pub(crate) fn active_picker(&self) -> Option<Player> {
        Player::ALL
            .into_iter()
            .find(|player| self.picks[player.index()].is_none())
    }

    /// Commits `character` for whoever is picking. Returns who that was.
    pub(crate) fn commit(&mut self, character: usize) -> Option<Player> {
        let player = self.active_picker()?;
        self.picks[player.index()] = Some(character);
        Some(player)
    }

    pub(crate) fn pick(&self, player: Player) -> Option<usize> {
        self.picks[player.index()]
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.picks.iter().all(Option::is_some)
    }

    pub(crate) fn highlight(&self, character: usize, hovered: Option<usize>) -> BoxHighlight {
        let is_pick = |player: Player| self.pick(player) == Some(character);
        match self.active_picker() {
            Some(Player::One) if hovered == Some(character) => BoxHighlight::PlayerOne,
            Some(Player::One) => BoxHighlight::Neutral,
            Some(Player::Two) if hovered == Some(character) => BoxHighlight::PlayerTwo,
            Some(Player::Two) if is_pick(Player::One) => BoxHighlight::PlayerOne,
            Some(Player::Two) => BoxHighlight::Neutral,
            None if is_pick(Player::Two) => BoxHighlight::PlayerTwo,
            None if is_pick(Player::One) => BoxHighlight::PlayerOne,
            None => BoxHighlight::Neutral,
        }
    }
}
