use tracing_subscriber::fmt::format::FmtSpan;

// The library never installs a subscriber on its own; binaries that embed the assemblers call this
// once at startup.
pub fn setup(env_filter: &str) {
    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NEW)
        .with_target(false)
        .with_env_filter(env_filter)
        .compact()
        .init();
}
