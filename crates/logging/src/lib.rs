//! helpers for logging.
//!
//! The libraries only talk to the `log` facade.  Binaries call [log_to_stderr] once at startup.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Log to stderr, filtered by `RUST_LOG` or [DEFAULT_FILTER].
///
/// If called multiple times in the same process, only applies once.
pub fn log_to_stderr() {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
            .format(|buf, record| {
                use std::io::Write;

                let now = time::OffsetDateTime::now_utc();

                writeln!(
                    buf,
                    "{} {} time={} target={}",
                    record.level(),
                    record.args(),
                    now,
                    record.target()
                )
            })
            .init();
        log::debug!("Logging initialized");
    });
}
