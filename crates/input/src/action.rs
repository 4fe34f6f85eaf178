use serde::{Deserialize, Serialize};

/// A discrete action applied uniformly to all ants for one tick.
///
/// The environment consumes actions, never raw integer codes. Integer codes
/// coming from an RL harness go through [`Action::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Step `ant_speed` along the current heading.
    MoveForward,
    /// Rotate by `-turn_angle`.
    TurnLeft,
    /// Rotate by `+turn_angle`.
    TurnRight,
    /// Leave a full-strength pheromone at the current position.
    DropPheromone,
    /// Do nothing (any code outside `0..=3`).
    Noop,
}

impl Action {
    /// Number of actions in the discrete action space. `Noop` is not part of it.
    pub const COUNT: usize = 4;

    /// The four actions of the action space, ordered by code.
    pub const ALL: [Action; Self::COUNT] = [
        Action::MoveForward,
        Action::TurnLeft,
        Action::TurnRight,
        Action::DropPheromone,
    ];

    /// Map an integer action code to an action. Out-of-range codes are a no-op.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Action::MoveForward,
            1 => Action::TurnLeft,
            2 => Action::TurnRight,
            3 => Action::DropPheromone,
            _ => Action::Noop,
        }
    }

    /// The integer code of this action, or `None` for `Noop`.
    pub fn code(self) -> Option<i64> {
        match self {
            Action::MoveForward => Some(0),
            Action::TurnLeft => Some(1),
            Action::TurnRight => Some(2),
            Action::DropPheromone => Some(3),
            Action::Noop => None,
        }
    }
}

impl From<i64> for Action {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_actions() {
        assert_eq!(Action::from_code(0), Action::MoveForward);
        assert_eq!(Action::from_code(1), Action::TurnLeft);
        assert_eq!(Action::from_code(2), Action::TurnRight);
        assert_eq!(Action::from_code(3), Action::DropPheromone);
    }

    #[test]
    fn out_of_range_codes_are_noop() {
        assert_eq!(Action::from_code(4), Action::Noop);
        assert_eq!(Action::from_code(-1), Action::Noop);
        assert_eq!(Action::from(i64::MAX), Action::Noop);
        assert_eq!(Action::Noop.code(), None);
    }

    #[test]
    fn all_is_ordered_by_code() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.code(), Some(i as i64));
        }
    }
}
