use std::fmt::Write;

use super::calendar_view::{CalendarCell, CalendarView, CellTimes, Progress, VIEW_TITLE};

const COLUMNS: usize = 6;
const CELL_WIDTH: usize = 14;
const BAR_WIDTH: usize = 30;

pub fn render_text(view: &CalendarView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", VIEW_TITLE);
    if let Some(start) = view.start_date() {
        let _ = writeln!(out, "Start date: {}", start.format("%Y-%m-%d"));
    }
    let _ = writeln!(out, "Location:   {}", view.location());
    let _ = writeln!(out, "{}", progress_bar(view.progress()));
    out.push('\n');

    for row in view.cells().chunks(COLUMNS) {
        let heads: Vec<String> = row.iter().map(cell_head).collect();
        let times: Vec<String> = row.iter().map(cell_times).collect();
        let _ = writeln!(out, "{}", join_padded(&heads));
        let _ = writeln!(out, "{}", join_padded(&times));
        out.push('\n');
    }
    out
}

/// `[☾█████░░░…] 6 / 30 days (20%)`
pub fn progress_bar(progress: Progress) -> String {
    let filled = (progress.percentage() / 100.0 * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[☾{}{}] {} ({:.0}%)",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        progress.label(),
        progress.percentage()
    )
}

fn cell_head(cell: &CalendarCell) -> String {
    format!("{:>2} {} {}", cell.day, cell.label, cell.state.mark())
}

fn cell_times(cell: &CalendarCell) -> String {
    match &cell.times {
        CellTimes::Pending => "   ...".to_string(),
        CellTimes::Resolved(times) => format!("   {}", times),
    }
}

fn join_padded(columns: &[String]) -> String {
    columns
        .iter()
        .map(|column| {
            let width = column.chars().count();
            format!("{}{}", column, " ".repeat(CELL_WIDTH.saturating_sub(width)))
        })
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_fills_proportionally() {
        let bar = progress_bar(Progress {
            completed: 15,
            total: 30,
        });
        assert_eq!(bar.matches('█').count(), 15);
        assert_eq!(bar.matches('░').count(), 15);
        assert!(bar.ends_with("15 / 30 days (50%)"));
    }

    #[test]
    fn join_pads_by_characters() {
        let joined = join_padded(&["ab ✓".to_string(), "c".to_string()]);
        assert_eq!(joined, format!("ab ✓{}c", " ".repeat(CELL_WIDTH - 4)));
    }
}
