//! Call state: what observers of a tracker see.

/// Where a tracker is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallPhase {
    /// Nothing fetched, nothing in flight.
    Idle,
    /// A call is in flight. `data` may still hold the previous value.
    Loading,
    /// The last call resolved.
    Succeeded,
    /// The last call rejected.
    Failed,
}

impl CallPhase {
    /// Check if a call is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, CallPhase::Loading)
    }

    /// Check if the last call settled, either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, CallPhase::Succeeded | CallPhase::Failed)
    }
}

/// Snapshot of a tracker's state.
///
/// Once a call has settled exactly one of `data` and `error` is present.
/// Both are absent before the first call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallState<T> {
    /// Value of the last successful call.
    pub data: Option<T>,
    /// Message of the last failed call.
    pub error: Option<String>,
    /// Whether a call is in flight.
    pub loading: bool,
}

impl<T> CallState<T> {
    /// The phase this state corresponds to.
    pub fn phase(&self) -> CallPhase {
        if self.loading {
            CallPhase::Loading
        } else if self.error.is_some() {
            CallPhase::Failed
        } else if self.data.is_some() {
            CallPhase::Succeeded
        } else {
            CallPhase::Idle
        }
    }

    /// No data, and nothing in flight.
    pub fn is_pristine(&self) -> bool {
        self.data.is_none() && !self.loading
    }
}

impl<T> Default for CallState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_derivation() {
        let mut state = CallState::<u8>::default();
        assert_eq!(state.phase(), CallPhase::Idle);
        assert!(state.is_pristine());

        state.loading = true;
        assert_eq!(state.phase(), CallPhase::Loading);
        assert!(!state.is_pristine());

        state.loading = false;
        state.data = Some(1);
        assert_eq!(state.phase(), CallPhase::Succeeded);
        assert!(!state.is_pristine());

        state.data = None;
        state.error = Some("boom".into());
        assert_eq!(state.phase(), CallPhase::Failed);
        assert!(state.is_pristine());
    }

    #[test]
    fn test_loading_with_stale_data() {
        let state = CallState {
            data: Some("old"),
            error: None,
            loading: true,
        };
        assert!(state.phase().is_loading());
        assert!(!state.phase().is_settled());
    }
}
