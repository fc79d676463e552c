//! Validator composition

use crate::error::ValidationError;

/// A check of one constraint on a prompt answer.
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Combines validators into one that reports the first failure in order.
///
/// Validators after the first failure are not called.
pub fn multi_validate(validators: Vec<Validator>) -> Validator {
    Box::new(move |input| validators.iter().try_for_each(|validate| validate(input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn reject(message: &'static str) -> Validator {
        Box::new(move |_| Err(ValidationError::new(message)))
    }

    fn counting(counter: Arc<AtomicUsize>) -> Validator {
        Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn empty_chain_accepts() {
        assert!(multi_validate(vec![])("anything").is_ok());
    }

    #[test]
    fn all_passing_accepts_and_runs_each_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let validate = multi_validate(vec![counting(calls.clone()), counting(calls.clone())]);

        assert!(validate("x").is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn first_failure_wins_and_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let validate = multi_validate(vec![
            counting(calls.clone()),
            reject("first"),
            reject("second"),
            counting(calls.clone()),
        ]);

        assert_eq!(validate("x").unwrap_err().message(), "first");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
