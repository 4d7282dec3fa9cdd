//! Output formatting utilities for the CLI
//!
//! Status messages and the container table go to stderr so that standard
//! output carries nothing but the remote process's output.

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use tabled::{settings::Style, Table, Tabled};

use rx_core::Container;

/// Format container search results as a numbered table
///
/// Creates a rounded table with one row per candidate, showing the name,
/// resource ID, project, primary address and Docker host. Row numbers are the
/// 1-based indices accepted by the selection prompt. Long names are truncated
/// to keep the table readable on narrow terminals.
///
/// # Arguments
/// * `containers` - Candidates in the order they will be offered
///
/// # Returns
/// A formatted string suitable for terminal output, or "No containers found"
/// if the list is empty.
pub fn format_containers(containers: &[Container]) -> String {
    if containers.is_empty() {
        return "No containers found".to_string();
    }

    #[derive(Tabled)]
    struct ContainerRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "NAME")]
        name: String,
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "PROJECT")]
        project: String,
        #[tabled(rename = "ADDRESS")]
        address: String,
        #[tabled(rename = "HOST")]
        host: String,
    }

    let rows: Vec<ContainerRow> = containers
        .iter()
        .enumerate()
        .map(|(i, c)| ContainerRow {
            index: i + 1,
            name: truncate(&c.name, 40),
            id: c.id.clone(),
            project: c.account_id.clone(),
            address: c.primary_ip().unwrap_or("-").to_string(),
            host: c.host_ip().unwrap_or("-").to_string(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Truncate a string to a maximum length, adding an ellipsis when cut
///
/// Lengths are counted in characters, not bytes. When `max_len` leaves no
/// room for the ellipsis the string is simply cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

fn print_status(color: Color, symbol: &str, msg: &str) {
    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(color),
        Print(symbol),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a success message in green with a checkmark prefix
pub fn print_success(msg: &str) {
    print_status(Color::Green, "✓ ", msg);
}

/// Print an error message in red with an X prefix
pub fn print_error(msg: &str) {
    print_status(Color::Red, "✗ ", msg);
}

/// Print a warning message in yellow
pub fn print_warning(msg: &str) {
    print_status(Color::Yellow, "⚠ ", msg);
}

/// Print an informational message in cyan
pub fn print_info(msg: &str) {
    print_status(Color::Cyan, "ℹ ", msg);
}
