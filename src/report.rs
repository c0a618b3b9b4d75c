use crate::config::GENERAL_SECTION;
use crate::logging::LogState;
use crate::rules::ResolutionContext;

/// Warn about every requested file name that was never found.
/// Returns the number of missing names.
pub fn report_missing(ctx: &ResolutionContext, log: &LogState) -> usize {
    let mut missing = 0;

    for (artist, record) in &ctx.rules {
        for name in &record.pending_names {
            log.warn(&format!("missing {} from {}", name, artist));
            missing += 1;
        }
    }

    for name in &ctx.file_names {
        log.warn(&format!("missing {} from {}", name, GENERAL_SECTION));
        missing += 1;
    }

    missing
}
