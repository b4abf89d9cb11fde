pub trait Traceable {
    /// Short component label (e.g., "CLK")
    fn trace_name(&self) -> &'static str;

    /// Component state worth recording, if any
    fn trace_state(&self) -> Option<String>;

    fn trace(&self) -> Option<String> {
        self.trace_state()
            .map(|state| format!("{} {}", self.trace_name(), state))
    }
}
