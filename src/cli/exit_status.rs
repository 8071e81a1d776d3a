use std::process::ExitCode;

/// Exit status of the docwalk binary.
///
/// - `Success` (0): Every file was extracted
/// - `Failure` (1): Some files could not be read or parsed
/// - `Error` (2): The command itself failed (bad config, bad arguments...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_failure_count(failures: usize) -> Self {
        if failures == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
