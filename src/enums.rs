/// Facing direction - selects the mirrored sprite-sheet variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FacingDirection {
    Left,
    Right,
}

impl FacingDirection {
    /// Suffix appended to animation names ("Walk" + "_left")
    pub fn suffix(&self) -> &'static str {
        match self {
            FacingDirection::Left => "left",
            FacingDirection::Right => "right",
        }
    }
}

/// Animation kind - base sprite-sheet name chosen from motion state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    Stand,
    Walk,
    Jump,
}

impl AnimationKind {
    pub fn name(&self) -> &'static str {
        match self {
            AnimationKind::Stand => "Stand",
            AnimationKind::Walk => "Walk",
            AnimationKind::Jump => "Jump",
        }
    }
}
