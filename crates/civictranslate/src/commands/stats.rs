//! Stats command handler.

use tabled::Tabled;

use civictranslate_core::{Dashboard, RequestStats};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Total")]
    total: usize,
    #[tabled(rename = "Pending")]
    pending: usize,
    #[tabled(rename = "In Progress")]
    in_progress: usize,
    #[tabled(rename = "Completed")]
    completed: usize,
}

impl From<&RequestStats> for StatRow {
    fn from(s: &RequestStats) -> Self {
        Self {
            total: s.total,
            pending: s.pending,
            in_progress: s.in_progress,
            completed: s.completed,
        }
    }
}

fn plain(s: &RequestStats) -> String {
    format!(
        "total {}\npending {}\nin-progress {}\ncompleted {}",
        s.total, s.pending, s.in_progress, s.completed
    )
}

/// Counts always come from the already-loaded collection.
#[allow(clippy::unnecessary_wraps)]
pub fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = dashboard.store().stats();
    let out = output::render_single(
        global.output,
        &stats,
        |s| output::render_list(OutputFormat::Table, &[*s], |s| StatRow::from(s), plain),
        plain,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
