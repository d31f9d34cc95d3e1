// Output formatting for the CLI

use serde::Serialize;

#[derive(Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }

    pub fn print_value<T: Serialize>(&self, value: &T) {
        if let OutputFormat::Json = self {
            match serde_json::to_string_pretty(value) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("failed to render JSON output: {err}"),
            }
        }
        // Text format is handled by each command
    }

    pub fn is_text(&self) -> bool {
        matches!(self, OutputFormat::Text)
    }
}

/// Print a simple key-value pair for text output
pub fn print_field(label: &str, value: &str) {
    println!("{:<16} {}", format!("{}:", label), value);
}

/// Pad or truncate a cell to `width`. Truncation counts characters, not
/// bytes: product and user names here are Spanish and routinely multibyte.
fn fit(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return format!("{value:<width$}");
    }
    let keep = width.saturating_sub(3);
    let truncated: String = value.chars().take(keep).collect();
    format!("{:<width$}", format!("{truncated}..."))
}

fn print_columns(cells: &[(&str, usize)]) {
    let line: Vec<String> = cells.iter().map(|(value, width)| fit(value, *width)).collect();
    println!("{}", line.join("  "));
}

/// Print a table header
pub fn print_table_header(columns: &[(&str, usize)]) {
    print_columns(columns);
}

/// Print a table row
pub fn print_table_row(values: &[(&str, usize)]) {
    print_columns(values);
}

/// Render an amount the way the storefront does
pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(59.9), "$59.90");
        assert_eq!(format_money(0.0), "$0.00");
    }

    #[test]
    fn test_fit_pads_short_values() {
        assert_eq!(fit("ID", 4), "ID  ");
        assert_eq!(fit("ñ", 3), "ñ  ");
    }

    #[test]
    fn test_fit_truncates_on_char_boundaries() {
        // Accented names must not panic when the cut lands mid-character
        assert_eq!(fit("Camión de Construcción Deluxe", 12), "Camión de...");
        assert_eq!(fit("ñandú ñandú", 8).chars().count(), 8);
    }
}
