/// Signature strings of the probe callables.
///
/// `sink` names the singleton that receives the probe calls; a field holding
/// it is synthesized once per instrumented unit. `clock` supplies the
/// timestamp passed to the exit probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub enter: String,
    pub exit: String,
    pub clock: String,
    pub sink: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enter: "trace/Trace.enter(string)".to_owned(),
            exit: "trace/Trace.exit(string,long)".to_owned(),
            clock: "trace/Clock.now()".to_owned(),
            sink: "trace/Trace".to_owned(),
        }
    }
}
