use crate::Indicator;

/// Colour hint for status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Info,
    Success,
    Warning,
    Error,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// What the control panel needs from a front-end.
///
/// `confirm` and `notify` block until the operator has responded.
pub trait Presenter {
    fn set_status(&mut self, text: &str, emphasis: Option<Emphasis>);

    fn set_update_indicator(&mut self, indicator: Indicator, message: &str);

    fn confirm(&mut self, title: &str, message: &str) -> bool;

    fn notify(&mut self, severity: Severity, title: &str, message: &str);
}
