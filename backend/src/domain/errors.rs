/// Failures the calendar domain can raise. Date-bound problems are always
/// resolved by clamping, so the only failure is a caller omitting an input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatePickerError {
    #[error("The property \"{argument}\" is required in \"{function}\"")]
    MissingRequiredArgument {
        function: &'static str,
        argument: &'static str,
    },
}

impl DatePickerError {
    pub fn missing(function: &'static str, argument: &'static str) -> Self {
        DatePickerError::MissingRequiredArgument { function, argument }
    }
}

/// Resolve a required argument or fail with `MissingRequiredArgument`
pub fn required<T>(
    value: Option<T>,
    function: &'static str,
    argument: &'static str,
) -> Result<T, DatePickerError> {
    value.ok_or_else(|| DatePickerError::missing(function, argument))
}
