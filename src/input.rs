use serde::{Deserialize, Serialize};

/// Level-triggered driving actions, sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputActions {
    pub accelerate: bool,
    pub reverse: bool,
    pub brake: bool,
    pub boost: bool,
}

impl InputActions {
    /// Accelerate held without reverse.
    pub fn forward_only(&self) -> bool {
        self.accelerate && !self.reverse
    }

    /// Reverse held without accelerate.
    pub fn reverse_only(&self) -> bool {
        self.reverse && !self.accelerate
    }

    pub fn boost_factor(&self, boost_multiplier: f64) -> f64 {
        if self.boost {
            boost_multiplier
        } else {
            1.0
        }
    }
}

/// Current level of the two turn keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnKeys {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyTransition {
    Pressed,
    Released,
}

/// One discrete adjustment of the target steer angle, produced by a single
/// key transition and applied exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnCommand {
    pub side: TurnSide,
    pub transition: KeyTransition,
}

impl TurnCommand {
    pub fn new(side: TurnSide, transition: KeyTransition) -> Self {
        Self { side, transition }
    }

    /// Multiple of the steering angle this command adds to the target.
    /// Left is positive.
    pub fn direction(&self) -> f64 {
        let side = match self.side {
            TurnSide::Left => 1.0,
            TurnSide::Right => -1.0,
        };
        match self.transition {
            KeyTransition::Pressed => side,
            KeyTransition::Released => -side,
        }
    }
}

/// Turns turn-key levels into edge commands by diffing against the levels
/// seen on the previous call.
#[derive(Debug, Clone, Default)]
pub struct TurnEdgeDetector {
    previous: TurnKeys,
}

impl TurnEdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the commands for every key whose level changed, left first.
    pub fn update(&mut self, keys: TurnKeys) -> impl Iterator<Item = TurnCommand> {
        let TurnKeys {
            left: prev_left,
            right: prev_right,
        } = self.previous;
        self.previous = keys;

        let left = edge(TurnSide::Left, prev_left, keys.left);
        let right = edge(TurnSide::Right, prev_right, keys.right);
        left.into_iter().chain(right)
    }

    pub fn keys(&self) -> TurnKeys {
        self.previous
    }

    /// Forgets the held keys without emitting releases.
    pub fn reset(&mut self) {
        self.previous = TurnKeys::default();
    }
}

fn edge(side: TurnSide, previous: bool, current: bool) -> Option<TurnCommand> {
    match (previous, current) {
        (false, true) => Some(TurnCommand::new(side, KeyTransition::Pressed)),
        (true, false) => Some(TurnCommand::new(side, KeyTransition::Released)),
        _ => None,
    }
}
