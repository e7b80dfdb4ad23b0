/// Process exit codes for failed runs.
///
/// A clean run or quit exits 0; clap exits 2 on invalid arguments.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    GeneralError = 1,
    ConfigError = 3,
    ApiError = 4,
    DeletionDisabled = 5,
    InputError = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}
