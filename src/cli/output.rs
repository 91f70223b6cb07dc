//! Output formatting for CLI

use crate::{
    q_learning::QTable,
    types::{Action, X_BUCKETS, Y_BUCKETS},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, String)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Render the greedy policy as a grid: one row per y bucket, one column per
/// x bucket. `J` marks jump, `.` no-jump, and `?` a state never updated.
pub fn render_policy_grid(table: &QTable) -> String {
    let grid = table.policy_grid();
    let mut out = String::from("  y\\x");
    for x in 0..X_BUCKETS {
        out.push_str(&format!(" {x}"));
    }
    out.push('\n');

    for y in 0..Y_BUCKETS {
        out.push_str(&format!("  {y:>3}"));
        for (x, column) in grid.iter().enumerate() {
            let cell = match column[y] {
                _ if is_unvisited(table, x, y) => '?',
                Action::Jump => 'J',
                Action::NoJump => '.',
            };
            out.push(' ');
            out.push(cell);
        }
        out.push('\n');
    }
    out
}

fn is_unvisited(table: &QTable, x: usize, y: usize) -> bool {
    crate::types::DiscreteState::new(x, y)
        .is_some_and(|state| table.values(state) == [0.0, 0.0])
}
