/// Traversal state definitions for the page walk
///
/// The walk is strictly sequential: a page is fetched, its entries are
/// classified, then the walk either moves to the previous page or stops.
use std::fmt;

/// Represents where the walk currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalState {
    /// A page request is in flight
    FetchingPage,

    /// Entry blocks of the fetched page are being classified
    ClassifyingEntries,

    /// The page was accepted; the previous page will be fetched next
    ContinueToPreviousPage,

    // ===== Terminal State =====
    /// The walk is over
    Stop,
}

impl TraversalState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stop)
    }

    /// Returns true if `next` is a legal successor of this state
    ///
    /// `FetchingPage → ClassifyingEntries → {ContinueToPreviousPage | Stop}`,
    /// and `ContinueToPreviousPage → FetchingPage`.
    pub fn can_transition_to(&self, next: TraversalState) -> bool {
        matches!(
            (self, next),
            (Self::FetchingPage, Self::ClassifyingEntries)
                | (Self::ClassifyingEntries, Self::ContinueToPreviousPage)
                | (Self::ClassifyingEntries, Self::Stop)
                | (Self::ContinueToPreviousPage, Self::FetchingPage)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchingPage => "fetching_page",
            Self::ClassifyingEntries => "classifying_entries",
            Self::ContinueToPreviousPage => "continue_to_previous_page",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for TraversalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_cycle() {
        assert!(TraversalState::FetchingPage.can_transition_to(TraversalState::ClassifyingEntries));
        assert!(TraversalState::ClassifyingEntries
            .can_transition_to(TraversalState::ContinueToPreviousPage));
        assert!(TraversalState::ClassifyingEntries.can_transition_to(TraversalState::Stop));
        assert!(TraversalState::ContinueToPreviousPage.can_transition_to(TraversalState::FetchingPage));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!TraversalState::FetchingPage.can_transition_to(TraversalState::Stop));
        assert!(!TraversalState::FetchingPage
            .can_transition_to(TraversalState::ContinueToPreviousPage));
        assert!(!TraversalState::ClassifyingEntries.can_transition_to(TraversalState::FetchingPage));
        assert!(!TraversalState::Stop.can_transition_to(TraversalState::FetchingPage));
        assert!(!TraversalState::Stop.can_transition_to(TraversalState::Stop));
    }

    #[test]
    fn test_is_terminal() {
        assert!(TraversalState::Stop.is_terminal());
        assert!(!TraversalState::FetchingPage.is_terminal());
        assert!(!TraversalState::ClassifyingEntries.is_terminal());
        assert!(!TraversalState::ContinueToPreviousPage.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TraversalState::FetchingPage), "fetching_page");
        assert_eq!(format!("{}", TraversalState::Stop), "stop");
    }
}
