//! Interaction modes: which voxel operation the next confirmed target gets.

use std::fmt;
use std::str::FromStr;

use crate::toolbox::ToolboxError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    #[default]
    Place,
    Repaint,
    Destroy,
    Transfer,
}

impl InteractionMode {
    pub const ALL: [InteractionMode; 4] = [
        InteractionMode::Place,
        InteractionMode::Repaint,
        InteractionMode::Destroy,
        InteractionMode::Transfer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InteractionMode::Place => "Place",
            InteractionMode::Repaint => "Repaint",
            InteractionMode::Destroy => "Destroy",
            InteractionMode::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InteractionMode {
    type Err = ToolboxError;

    /// Accepts the mode name or its flag name ("repaint" / "repaintMode").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_suffix("Mode").unwrap_or(s);
        match name.to_ascii_lowercase().as_str() {
            "place" => Ok(InteractionMode::Place),
            "repaint" => Ok(InteractionMode::Repaint),
            "destroy" => Ok(InteractionMode::Destroy),
            "transfer" => Ok(InteractionMode::Transfer),
            _ => Err(ToolboxError::UnknownMode(s.to_string())),
        }
    }
}

/// One flag per mode; exactly one is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeFlags {
    pub place: bool,
    pub repaint: bool,
    pub destroy: bool,
    pub transfer: bool,
}

impl From<InteractionMode> for ModeFlags {
    fn from(mode: InteractionMode) -> Self {
        Self {
            place: mode == InteractionMode::Place,
            repaint: mode == InteractionMode::Repaint,
            destroy: mode == InteractionMode::Destroy,
            transfer: mode == InteractionMode::Transfer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_flag_names() {
        assert_eq!("place".parse::<InteractionMode>().unwrap(), InteractionMode::Place);
        assert_eq!(
            "repaintMode".parse::<InteractionMode>().unwrap(),
            InteractionMode::Repaint
        );
        assert_eq!(
            "Transfer".parse::<InteractionMode>().unwrap(),
            InteractionMode::Transfer
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "showError".parse::<InteractionMode>().unwrap_err();
        assert!(matches!(err, ToolboxError::UnknownMode(name) if name == "showError"));
    }

    #[test]
    fn exactly_one_flag_is_set() {
        for mode in InteractionMode::ALL {
            let flags = ModeFlags::from(mode);
            let set = [flags.place, flags.repaint, flags.destroy, flags.transfer]
                .iter()
                .filter(|f| **f)
                .count();
            assert_eq!(set, 1, "{mode}");
        }
    }
}
