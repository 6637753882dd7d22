/// Identifier for one submission. Changes on every submit so a late result can
/// never settle a newer turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

impl TurnId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Lifecycle of the current turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    Sending(TurnId),
    Fulfilled(TurnId),
    Failed {
        turn: TurnId,
        message: String,
    },
}

/// State transition input for the turn lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnTransition {
    Submit(TurnId),
    Fulfil(TurnId),
    Fail { turn: TurnId, message: String },
    Settle,
}

/// Rejection reason for illegal turn transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnRejection {
    EmptyMessage,
    AlreadySending { active: TurnId, attempted: TurnId },
    NoPendingTurn,
    TurnMismatch { active: TurnId, attempted: TurnId },
    StillSending(TurnId),
}

pub type TurnTransitionResult = Result<TurnState, TurnRejection>;

impl TurnState {
    /// Returns the outstanding turn if and only if state is `Sending`.
    pub fn pending_turn(&self) -> Option<TurnId> {
        match self {
            Self::Sending(turn) => Some(*turn),
            Self::Idle | Self::Fulfilled(_) | Self::Failed { .. } => None,
        }
    }

    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending(_))
    }

    /// Applies one transition deterministically.
    ///
    /// `Submit` is accepted from any non-sending state. `Fulfil`/`Fail` must name
    /// the outstanding turn. `Settle` returns a finished turn to `Idle` and is
    /// refused while a request is still outstanding.
    pub fn apply(&self, transition: TurnTransition) -> TurnTransitionResult {
        match transition {
            TurnTransition::Submit(turn) => self.apply_submit(turn),
            TurnTransition::Fulfil(turn) => self.apply_finish(turn, Self::Fulfilled(turn)),
            TurnTransition::Fail { turn, message } => {
                self.apply_finish(turn, Self::Failed { turn, message })
            }
            TurnTransition::Settle => self.apply_settle(),
        }
    }

    fn apply_submit(&self, turn: TurnId) -> TurnTransitionResult {
        match self {
            Self::Sending(active) => Err(TurnRejection::AlreadySending {
                active: *active,
                attempted: turn,
            }),
            Self::Idle | Self::Fulfilled(_) | Self::Failed { .. } => Ok(Self::Sending(turn)),
        }
    }

    fn apply_finish(&self, turn: TurnId, next: TurnState) -> TurnTransitionResult {
        match self {
            Self::Sending(active) if *active == turn => Ok(next),
            Self::Sending(active) => Err(TurnRejection::TurnMismatch {
                active: *active,
                attempted: turn,
            }),
            Self::Idle | Self::Fulfilled(_) | Self::Failed { .. } => {
                Err(TurnRejection::NoPendingTurn)
            }
        }
    }

    fn apply_settle(&self) -> TurnTransitionResult {
        match self {
            Self::Sending(active) => Err(TurnRejection::StillSending(*active)),
            Self::Idle | Self::Fulfilled(_) | Self::Failed { .. } => Ok(Self::Idle),
        }
    }
}
