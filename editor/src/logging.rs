use std::io::Write;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Prefix carried by every log line of the add-on.
pub const PREFIX: &str = "[PartWizard]";

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

/// Formats time since start as `[hh:mm:ss.mmm]`, or `[dd:hh:mm:ss.mmm]`
/// once a full day has passed.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let ms = total_ms % 1000;
    let secs = (total_ms / 1000) % 60;
    let mins = (total_ms / 60_000) % 60;
    let hours = (total_ms / 3_600_000) % 24;
    let days = total_ms / 86_400_000;
    if days == 0 {
        format!("[{hours:02}:{mins:02}:{secs:02}.{ms:03}]")
    } else {
        format!("[{days:02}:{hours:02}:{mins:02}:{secs:02}.{ms:03}]")
    }
}

/// Install the `env_logger` backend with the add-on prefix and elapsed time
/// on every line. The filter defaults to `info` and follows `RUST_LOG`.
///
/// Returns `false` if a logger was already installed.
pub fn install() -> bool {
    start();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{PREFIX} {} {:<5} {}",
                format_elapsed(start().elapsed()),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(Duration::ZERO, "[00:00:00.000]")]
    #[case::millis(Duration::from_millis(1_234), "[00:00:01.234]")]
    #[case::hours(Duration::from_secs(3 * 3600 + 25 * 60 + 7), "[03:25:07.000]")]
    #[case::just_under_a_day(Duration::from_millis(86_399_999), "[23:59:59.999]")]
    #[case::days(Duration::from_secs(2 * 86_400 + 3_661), "[02:01:01:01.000]")]
    fn elapsed_formatting(#[case] elapsed: Duration, #[case] expected: &str) {
        assert_eq!(format_elapsed(elapsed), expected);
    }

    #[test]
    fn second_install_is_refused() {
        install();
        assert!(!install());
    }
}
