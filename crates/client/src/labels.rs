//! Display names of players, owned by the front end.
use std::collections::BTreeMap;

use game_core::{PlayerId, PlayerKind};

#[derive(Clone, Debug, Default)]
pub struct PlayerLabels {
    labels: BTreeMap<PlayerId, String>,
    detectives: u32,
}

impl PlayerLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names a newly seated player.
    pub fn assign(&mut self, player: PlayerId, kind: PlayerKind) {
        let label = match kind {
            PlayerKind::MrX => "Mr. X".to_string(),
            PlayerKind::Detective => {
                self.detectives += 1;
                format!("Detective {}", self.detectives)
            }
        };
        self.labels.insert(player, label);
    }

    pub fn label(&self, player: PlayerId) -> String {
        match self.labels.get(&player) {
            Some(label) => format!("{label} ({player})"),
            None => player.to_string(),
        }
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.detectives = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detectives_are_numbered_in_seating_order() {
        let mut labels = PlayerLabels::new();
        labels.assign(PlayerId(0), PlayerKind::MrX);
        labels.assign(PlayerId(1), PlayerKind::Detective);
        labels.assign(PlayerId(2), PlayerKind::Detective);

        assert_eq!(labels.label(PlayerId(0)), "Mr. X (#0)");
        assert_eq!(labels.label(PlayerId(2)), "Detective 2 (#2)");
        assert_eq!(labels.label(PlayerId(9)), "#9");

        labels.clear();
        labels.assign(PlayerId(3), PlayerKind::Detective);
        assert_eq!(labels.label(PlayerId(3)), "Detective 1 (#3)");
    }
}
