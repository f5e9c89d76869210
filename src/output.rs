// Colored terminal output for one-shot scoring results.

use colored::Colorize;

use crate::scorer::{Category, CategoryScores};

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Display a scoring result for the `sift score` command.
pub fn display_scores(text: &str, scores: &CategoryScores, sentiment: f64) {
    println!("\n{}", format!("=== \"{}\" ===", truncate_chars(text, 60)).bold());
    println!();

    for category in Category::ALL {
        let score = scores.get(category);
        println!("  {:<18} {}", category.as_str().dimmed(), colorize_score(score));
    }

    println!();
    println!("  {:<18} {:>5.2}", "sentiment".dimmed(), sentiment);
}

/// Color a category score by severity: red above 0.7, yellow above 0.3.
fn colorize_score(score: f64) -> String {
    let formatted = format!("{score:>5.2}");
    if score >= 0.7 {
        formatted.red().bold().to_string()
    } else if score >= 0.3 {
        formatted.yellow().to_string()
    } else {
        formatted.normal().to_string()
    }
}
