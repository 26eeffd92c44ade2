//! Output formatting structures for CLI display

use tabled::settings::{object::Rows, Color, Modify, Style};
use tabled::{Table, Tabled};

/// Table row for displaying projects
#[derive(Tabled)]
pub struct ProjectRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Full name")]
    pub full_name: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

/// Table row for displaying repositories
#[derive(Tabled)]
pub struct RepositoryRow {
    #[tabled(rename = "Repository")]
    pub name: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Active branches")]
    pub active_branches: u64,
}

/// Table row for displaying developers of a repository
#[derive(Tabled)]
pub struct DeveloperRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Last commit")]
    pub last_commit: String,
}

/// Renders rows as a rounded table with a highlighted header
pub fn render_table<T: Tabled>(rows: Vec<T>) -> Table {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Color::FG_BRIGHT_CYAN));
    table
}
