/// The four base tones a rendered player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteGroup {
    Red,
    Blue,
    Yellow,
    Green,
}

/// A concrete fill for one rendered entity.
///
/// `shade` 0 is the primary tone for the group; higher shades are the lighter
/// variants used for team shades and for Nana, so Ice Climber pairs and
/// same-team players stay tellable apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerPalette {
    pub group: PaletteGroup,
    pub shade: u8,
}

impl PlayerPalette {
    /// Palette for a teams game. The team id picks the group and the team
    /// shade picks the variant within it, with Nana always taking shade 1.
    pub fn for_team(team_id: u8, team_shade: u8, is_nana: bool) -> Self {
        let group = match team_id {
            0 => PaletteGroup::Red,
            1 => PaletteGroup::Blue,
            _ => PaletteGroup::Green,
        };

        Self {
            group,
            shade: if is_nana { 1 } else { team_shade },
        }
    }

    /// Palette for a free-for-all, where the seat index picks the group.
    pub fn for_port(player_index: usize, is_nana: bool) -> Self {
        let group = match player_index % 4 {
            0 => PaletteGroup::Red,
            1 => PaletteGroup::Blue,
            2 => PaletteGroup::Yellow,
            _ => PaletteGroup::Green,
        };

        Self {
            group,
            shade: if is_nana { 1 } else { 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ports_cycle_through_the_four_groups() {
        assert_eq!(PlayerPalette::for_port(0, false).group, PaletteGroup::Red);
        assert_eq!(PlayerPalette::for_port(1, false).group, PaletteGroup::Blue);
        assert_eq!(PlayerPalette::for_port(2, false).group, PaletteGroup::Yellow);
        assert_eq!(PlayerPalette::for_port(3, false).group, PaletteGroup::Green);
    }

    #[test]
    fn nana_always_takes_the_light_shade() {
        assert_eq!(PlayerPalette::for_port(0, true).shade, 1);
        assert_eq!(PlayerPalette::for_team(1, 0, true).shade, 1);
        assert_eq!(PlayerPalette::for_team(1, 2, false).shade, 2);
    }
}
