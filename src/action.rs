use std::fmt::{Debug, Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::Character;
use crate::Character::{Ambassador, Assassin, Captain, Duke};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Income,
    ForeignAid,
    Coup,
    Tax,
    Assassinate,
    Steal,
    Exchange,
}

pub static ACTION_VARIANTS: [Action; 7] = [
    Action::Income,
    Action::ForeignAid,
    Action::Coup,
    Action::Tax,
    Action::Assassinate,
    Action::Steal,
    Action::Exchange,
];

/// Static rules metadata for an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActionSpec {
    pub can_be_challenged: bool,
    pub can_be_countered: bool,
    pub requires_target: bool,
    pub associated_character: Option<Character>,
}

impl Action {
    pub const fn spec(self) -> ActionSpec {
        //                                     challenge counter target  character
        match self {
            Action::Income      => ActionSpec::new(false, false, false, None),
            Action::ForeignAid  => ActionSpec::new(false, true,  false, None),
            Action::Coup        => ActionSpec::new(false, false, true,  None),
            Action::Tax         => ActionSpec::new(true,  false, false, Some(Duke)),
            Action::Assassinate => ActionSpec::new(true,  true,  true,  Some(Assassin)),
            Action::Steal       => ActionSpec::new(true,  true,  true,  Some(Captain)),
            Action::Exchange    => ActionSpec::new(true,  false, false, Some(Ambassador)),
        }
    }

    pub const fn can_be_challenged(self) -> bool {
        self.spec().can_be_challenged
    }

    pub const fn can_be_countered(self) -> bool {
        self.spec().can_be_countered
    }

    pub const fn requires_target(self) -> bool {
        self.spec().requires_target
    }

    pub const fn associated_character(self) -> Option<Character> {
        self.spec().associated_character
    }
}

impl ActionSpec {
    const fn new(
        can_be_challenged: bool,
        can_be_countered: bool,
        requires_target: bool,
        associated_character: Option<Character>,
    ) -> Self {
        Self { can_be_challenged, can_be_countered, requires_target, associated_character }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Income => "Income",
            Action::ForeignAid => "Foreign Aid",
            Action::Coup => "Coup",
            Action::Tax => "Tax",
            Action::Assassinate => "Assassinate",
            Action::Steal => "Steal",
            Action::Exchange => "Exchange",
        };
        f.write_str(name)
    }
}

/// A block declared against an action, claiming `claimed` as the blocking role.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterAction {
    pub blocks: Action,
    pub claimed: Character,
}

impl Debug for CounterAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("blocks {} with {}", self.blocks, self.claimed))
    }
}

/// The narrative line for a declared action.
pub fn describe(actor: &str, action: Action, target: Option<&str>) -> String {
    match (action, target) {
        (Action::Income, _) => format!("{actor} takes Income"),
        (Action::ForeignAid, _) => format!("{actor} asks for Foreign Aid"),
        (Action::Tax, _) => format!("{actor} collects Tax as the Duke"),
        (Action::Exchange, _) => format!("{actor} exchanges cards as the Ambassador"),
        (Action::Coup, Some(target)) => format!("{actor} launches a Coup against {target}"),
        (Action::Assassinate, Some(target)) => format!("{actor} attempts to Assassinate {target}"),
        (Action::Steal, Some(target)) => format!("{actor} attempts to Steal from {target}"),
        (action, None) => format!("{actor} declares {action}"),
    }
}

pub fn describe_counter(countering: &str, actor: &str, counter: CounterAction) -> String {
    format!("{countering} blocks {actor}'s {} claiming the {}", counter.blocks, counter.claimed)
}
