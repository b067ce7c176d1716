use crate::constants::{EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS};

/// Result of running one command, reduced to what the process reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    Interrupted,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => EXIT_SUCCESS,
            Outcome::Failure => EXIT_FAILURE,
            Outcome::Interrupted => EXIT_INTERRUPTED,
        }
    }

    /// `Success` for `true`, `Failure` for `false`.
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Success.exit_code(), 0);
        assert_eq!(Outcome::Failure.exit_code(), 1);
        assert_eq!(Outcome::Interrupted.exit_code(), 130);
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(Outcome::from_bool(true), Outcome::Success);
        assert_eq!(Outcome::from_bool(false), Outcome::Failure);
    }
}
