/// Display name and quota for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInfo {
    pub name: &'static str,
    pub target_count: usize,
}

/// Difficulty modes, in menu order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    Quick,
    Normal,
    Burst,
    Extended,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Quick,
        GameMode::Normal,
        GameMode::Burst,
        GameMode::Extended,
    ];

    /// Inverse of the `Display` key used on disk
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.to_string() == key)
    }

    pub fn info(&self) -> ModeInfo {
        match self {
            GameMode::Quick => ModeInfo {
                name: "10 Targets",
                target_count: 10,
            },
            GameMode::Normal => ModeInfo {
                name: "20 Targets",
                target_count: 20,
            },
            GameMode::Burst => ModeInfo {
                name: "Burst - 30 Targets",
                target_count: 30,
            },
            GameMode::Extended => ModeInfo {
                name: "50 Targets",
                target_count: 50,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn target_count(&self) -> usize {
        self.info().target_count
    }
}

/// Look up a mode by its key; `None` for keys outside the closed set
pub fn get_mode_info(key: &str) -> Option<ModeInfo> {
    GameMode::from_key(key).map(|mode| mode.info())
}

/// All modes in declaration order
pub fn get_all_modes() -> impl Iterator<Item = (GameMode, ModeInfo)> {
    GameMode::ALL.into_iter().map(|mode| (mode, mode.info()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotas() {
        assert_eq!(GameMode::Quick.target_count(), 10);
        assert_eq!(GameMode::Normal.target_count(), 20);
        assert_eq!(GameMode::Burst.target_count(), 30);
        assert_eq!(GameMode::Extended.target_count(), 50);
    }

    #[test]
    fn test_get_mode_info_known_key() {
        let info = get_mode_info("burst").unwrap();
        assert_eq!(info.name, "Burst - 30 Targets");
        assert_eq!(info.target_count, 30);
    }

    #[test]
    fn test_get_mode_info_unknown_key() {
        assert_eq!(get_mode_info("marathon"), None);
        assert_eq!(get_mode_info("Quick"), None);
    }

    #[test]
    fn test_all_modes_in_declaration_order() {
        let keys: Vec<String> = get_all_modes().map(|(mode, _)| mode.to_string()).collect();
        assert_eq!(keys, vec!["quick", "normal", "burst", "extended"]);
    }

    #[test]
    fn test_from_key_inverts_display() {
        for mode in GameMode::ALL {
            assert_eq!(GameMode::from_key(&mode.to_string()), Some(mode));
        }
        assert_eq!(GameMode::from_key("Burst"), None);
    }
}
