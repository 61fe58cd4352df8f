use std::fmt::Display;
use std::sync::Mutex;

/// Result / loading / error triple tracked for one operation kind. The UI
/// only ever sees clones of this, never references into the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationState<T> {
    pub result: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self {
            result: None,
            is_loading: false,
            error: None,
        }
    }
}

struct Inner<T> {
    state: OperationState<T>,
    seq: u64,
}

/// State cell for one operation kind.
///
/// Every trigger captures a sequence token under the same lock that flips
/// `is_loading`; a completion must present its token to commit. A token
/// that is no longer current means the request was superseded by a newer
/// trigger or by `clear`, and the completion is dropped.
pub struct OperationCell<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> OperationCell<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: OperationState::default(),
                seq: 0,
            }),
        }
    }

    /// Mark the operation in flight and hand back the token the eventual
    /// completion must present. Runs synchronously before the call is
    /// issued, so the UI sees the spinner immediately.
    pub fn begin(&self) -> u64 {
        let mut inner = self.lock();
        inner.seq += 1;
        inner.state.is_loading = true;
        inner.state.error = None;
        inner.seq
    }

    /// Commit an outcome if `token` is still the newest issued. A failure
    /// records its display message and leaves the previous result visible.
    /// Returns whether the outcome was committed.
    pub fn complete<E: Display>(&self, token: u64, outcome: Result<T, E>) -> bool {
        let mut inner = self.lock();
        if token != inner.seq {
            return false;
        }
        inner.state.is_loading = false;
        match outcome {
            Ok(value) => {
                inner.state.result = Some(value);
                inner.state.error = None;
            }
            Err(err) => {
                inner.state.error = Some(err.to_string());
            }
        }
        true
    }

    /// Reset to the idle state and invalidate any in-flight request for
    /// this operation.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.seq += 1;
        inner.state = OperationState::default();
    }

    pub fn snapshot(&self) -> OperationState<T> {
        self.lock().state.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        self.inner.lock().expect("operation state lock poisoned")
    }
}

impl<T: Clone> Default for OperationCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_replaces_result_and_clears_error() {
        let cell: OperationCell<Vec<u32>> = OperationCell::new();

        let token = cell.begin();
        assert!(cell.snapshot().is_loading);
        assert!(cell.complete(token, Ok::<_, String>(vec![1, 2])));

        let state = cell.snapshot();
        assert_eq!(state.result, Some(vec![1, 2]));
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let cell: OperationCell<Vec<u32>> = OperationCell::new();

        let token = cell.begin();
        cell.complete(token, Ok::<_, String>(vec![7]));

        let token = cell.begin();
        cell.complete(token, Err::<Vec<u32>, _>("network error".to_string()));

        let state = cell.snapshot();
        assert_eq!(state.result, Some(vec![7]));
        assert_eq!(state.error, Some("network error".to_string()));
        assert!(!state.is_loading);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let cell: OperationCell<u32> = OperationCell::new();

        let first = cell.begin();
        let second = cell.begin();

        assert!(cell.complete(second, Ok::<_, String>(2)));
        assert!(!cell.complete(first, Ok::<_, String>(1)));

        assert_eq!(cell.snapshot().result, Some(2));
    }

    #[test]
    fn test_clear_invalidates_in_flight_token() {
        let cell: OperationCell<u32> = OperationCell::new();

        let token = cell.begin();
        cell.clear();

        assert!(!cell.complete(token, Ok::<_, String>(9)));
        assert_eq!(cell.snapshot(), OperationState::default());
    }

    #[test]
    fn test_clear_on_idle_cell_is_a_no_op() {
        let cell: OperationCell<u32> = OperationCell::new();
        assert_eq!(cell.snapshot(), OperationState::default());

        cell.clear();
        assert_eq!(cell.snapshot(), OperationState::default());
    }

    #[test]
    fn test_begin_clears_error_but_not_result() {
        let cell: OperationCell<u32> = OperationCell::new();

        let token = cell.begin();
        cell.complete(token, Ok::<_, String>(5));
        let token = cell.begin();
        cell.complete(token, Err::<u32, _>("boom".to_string()));

        cell.begin();
        let state = cell.snapshot();
        assert_eq!(state.result, Some(5));
        assert_eq!(state.error, None);
        assert!(state.is_loading);
    }
}
