//! The attribution state machine as a plain reducer.

use std::sync::Arc;

use crate::location::{HistoryAction, Location};
use crate::sid::{ObjectIdSidResolver, SidResolver};

/// Lifecycle events from the application shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// The shell came up on this location.
    Mount(Location),
    /// The router moved to `location`.
    Navigate { location: Location, action: HistoryAction },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    /// Validating a hash the page was opened with. The mint issued on the
    /// same mount is [`FlowMachine::last_seq`] and does not change the state.
    Checking { hash: String },
    /// Mint `seq` is the latest one issued and no inbound check came with it.
    Minting { seq: u64 },
}

/// Work the driver must carry out, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CheckHash(String),
    Mint { seq: u64, sid: Option<String> },
}

/// Decides, per shell event, whether to check an inbound hash and whether to
/// mint a new one. Holds no I/O; [`crate::AttributionFlow`] executes the
/// returned effects.
pub struct FlowMachine {
    state: FlowState,
    current: Option<Location>,
    last_seq: u64,
    resolver: Arc<dyn SidResolver>,
}

impl Default for FlowMachine {
    fn default() -> Self {
        Self::new(Arc::new(ObjectIdSidResolver))
    }
}

impl FlowMachine {
    pub fn new(resolver: Arc<dyn SidResolver>) -> Self {
        Self { state: FlowState::Idle, current: None, last_seq: 0, resolver }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    /// Sequence number of the latest mint, 0 before the first.
    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }

    pub fn transition(&mut self, event: ShellEvent) -> Vec<Effect> {
        match event {
            ShellEvent::Mount(location) => {
                // No key means the page was loaded directly, not reached in-app.
                let inbound = match (location.fragment(), &location.key) {
                    (Some(fragment), None) => Some(fragment.to_owned()),
                    _ => None,
                };
                let mint = self.mint(&location);
                self.current = Some(location);
                match inbound {
                    Some(hash) => {
                        self.state = FlowState::Checking { hash: hash.clone() };
                        vec![Effect::CheckHash(hash), mint]
                    }
                    None => {
                        self.state = FlowState::Minting { seq: self.last_seq };
                        vec![mint]
                    }
                }
            }
            ShellEvent::Navigate { location, action } => {
                let moved = self.current.as_ref().is_none_or(|current| !current.same_page(&location));
                let effects = if action == HistoryAction::Push && moved {
                    let mint = self.mint(&location);
                    self.state = FlowState::Minting { seq: self.last_seq };
                    vec![mint]
                } else {
                    Vec::new()
                };
                self.current = Some(location);
                effects
            }
        }
    }

    /// Issue the next mint. Callers set the resulting state.
    fn mint(&mut self, location: &Location) -> Effect {
        self.last_seq += 1;
        Effect::Mint { seq: self.last_seq, sid: self.resolver.resolve(&location.pathname) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SID: &str = "5a1b2c3d4e5f6a7b8c9d0e1f";

    fn push(href: &str) -> ShellEvent {
        let mut location = Location::parse(href);
        location.key = Some("k".into());
        ShellEvent::Navigate { location, action: HistoryAction::Push }
    }

    #[test]
    fn fresh_load_with_fragment_checks_then_mints() {
        let mut m = FlowMachine::default();
        let effects = m.transition(ShellEvent::Mount(Location::parse("/story-slug#abc123")));
        assert_eq!(
            effects,
            vec![Effect::CheckHash("abc123".into()), Effect::Mint { seq: 1, sid: None }]
        );
        assert_eq!(m.state(), &FlowState::Checking { hash: "abc123".into() });
        assert_eq!(m.last_seq(), 1);

        // The next push leaves the check behind.
        assert_eq!(m.transition(push("/other")), vec![Effect::Mint { seq: 2, sid: None }]);
        assert_eq!(m.state(), &FlowState::Minting { seq: 2 });
    }

    #[test]
    fn keyed_or_bare_mount_only_mints() {
        let mut m = FlowMachine::default();
        let mut keyed = Location::parse(&format!("/tech/{SID}#abc123"));
        keyed.key = Some("x1y2z3".into());
        assert_eq!(
            m.transition(ShellEvent::Mount(keyed)),
            vec![Effect::Mint { seq: 1, sid: Some(SID.into()) }]
        );
        assert_eq!(m.state(), &FlowState::Minting { seq: 1 });

        let mut m = FlowMachine::default();
        assert_eq!(m.transition(ShellEvent::Mount(Location::parse("/"))), vec![Effect::Mint { seq: 1, sid: None }]);
    }

    #[test]
    fn push_to_a_new_page_mints_once() {
        let mut m = FlowMachine::default();
        m.transition(ShellEvent::Mount(Location::parse("/a")));
        assert_eq!(m.transition(push("/b")), vec![Effect::Mint { seq: 2, sid: None }]);
        assert_eq!(m.transition(push("/b?page=2")), vec![Effect::Mint { seq: 3, sid: None }]);
        assert_eq!(m.last_seq(), 3);
    }

    #[test]
    fn push_to_the_same_page_mints_nothing() {
        let mut m = FlowMachine::default();
        m.transition(ShellEvent::Mount(Location::parse("/a")));
        assert!(m.transition(push("/a")).is_empty());
        assert!(m.transition(push("/a#other")).is_empty());
        assert_eq!(m.last_seq(), 1);
    }

    #[test]
    fn replace_and_pop_are_ignored_but_tracked() {
        let mut m = FlowMachine::default();
        m.transition(ShellEvent::Mount(Location::parse("/a")));
        for action in [HistoryAction::Replace, HistoryAction::Pop] {
            let effects = m.transition(ShellEvent::Navigate { location: Location::parse("/b"), action });
            assert!(effects.is_empty());
        }
        assert_eq!(m.current().map(|l| l.pathname.as_str()), Some("/b"));
        // Now on /b, so pushing /b is not a move.
        assert!(m.transition(push("/b")).is_empty());
    }

    #[test]
    fn custom_resolver_supplies_the_sid() {
        let resolver = |path: &str| path.strip_prefix("/s/").map(str::to_owned);
        let mut m = FlowMachine::new(Arc::new(resolver));
        assert_eq!(
            m.transition(ShellEvent::Mount(Location::parse("/s/42"))),
            vec![Effect::Mint { seq: 1, sid: Some("42".into()) }]
        );
    }
}
