//! Disclosure module - expand/collapse state of a detail view
//!
//! A detail view has two sections, Source and Reviews, each either collapsed
//! or expanded. They never share a transition. The state lives exactly as
//! long as the view that owns it and is never persisted.

/// A collapsible section of a detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Provenance of the entity (primary content)
    Source,
    /// Expert review summary (secondary content)
    Reviews,
}

/// State of a single section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionState {
    /// Body hidden
    Collapsed,
    /// Body visible
    Expanded,
}

impl SectionState {
    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            SectionState::Collapsed => SectionState::Expanded,
            SectionState::Expanded => SectionState::Collapsed,
        }
    }

    /// Whether the body is visible
    pub fn is_expanded(self) -> bool {
        self == SectionState::Expanded
    }
}

/// Per-view disclosure state for the Source and Reviews sections
///
/// The default is Source expanded, Reviews collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disclosure {
    source: SectionState,
    reviews: SectionState,
}

impl Disclosure {
    /// Initial state of a freshly mounted view
    pub fn new() -> Self {
        Self {
            source: SectionState::Expanded,
            reviews: SectionState::Collapsed,
        }
    }

    /// Build an arbitrary state
    pub fn with_states(source: SectionState, reviews: SectionState) -> Self {
        Self { source, reviews }
    }

    /// Current state of `section`
    pub fn state(&self, section: Section) -> SectionState {
        match section {
            Section::Source => self.source,
            Section::Reviews => self.reviews,
        }
    }

    /// Whether `section` is expanded
    pub fn is_expanded(&self, section: Section) -> bool {
        self.state(section).is_expanded()
    }

    /// Flip `section`, leaving the other section untouched
    pub fn toggle(&mut self, section: Section) -> SectionState {
        let slot = match section {
            Section::Source => &mut self.source,
            Section::Reviews => &mut self.reviews,
        };
        *slot = slot.toggled();
        *slot
    }
}

impl Default for Disclosure {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [SectionState; 2] = [SectionState::Collapsed, SectionState::Expanded];

    #[test]
    fn test_initial_state() {
        let disclosure = Disclosure::default();
        assert!(disclosure.is_expanded(Section::Source));
        assert!(!disclosure.is_expanded(Section::Reviews));
    }

    #[test]
    fn test_toggle_flips() {
        let mut disclosure = Disclosure::new();
        assert_eq!(disclosure.toggle(Section::Source), SectionState::Collapsed);
        assert_eq!(disclosure.toggle(Section::Source), SectionState::Expanded);
        assert_eq!(disclosure.toggle(Section::Reviews), SectionState::Expanded);
    }

    #[test]
    fn test_sections_are_independent() {
        for source in ALL_STATES {
            for reviews in ALL_STATES {
                let mut disclosure = Disclosure::with_states(source, reviews);
                disclosure.toggle(Section::Source);
                assert_eq!(disclosure.state(Section::Source), source.toggled());
                assert_eq!(disclosure.state(Section::Reviews), reviews);

                let mut disclosure = Disclosure::with_states(source, reviews);
                disclosure.toggle(Section::Reviews);
                assert_eq!(disclosure.state(Section::Reviews), reviews.toggled());
                assert_eq!(disclosure.state(Section::Source), source);
            }
        }
    }
}
