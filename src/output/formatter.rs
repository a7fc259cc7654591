use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::ranking::validation::format_total;
use crate::ranking::{Product, ScoredResult, Weights};
use crate::store::User;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with exactly four decimals ("0.9046")
pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}

/// Format a number rounded to an integer with thousands separators
/// (7500000 -> "7,500,000")
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a ranking as a table with columns: Rank, Score, Name, Id
/// No headers. Rank column is right-aligned with a trailing dot, score column
/// is 6 chars wide (fits "1.0000").
pub fn format_ranking_table(results: &[ScoredResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No products found.".to_string();
    }

    let term_width = get_terminal_width();
    let rank_width = format!("{}.", results.len()).len().max(3);
    let score_width = 6;
    let separator = "  ";

    results
        .iter()
        .map(|result| {
            let rank_str = format!("{:>width$}", format!("{}.", result.rank), width = rank_width);
            let score_str = format!("{:>width$}", format_score(result.score), width = score_width);

            let id_len = result.product.id.chars().count();
            let fixed_width = rank_width + 1 + score_width + separator.len() * 2 + id_len;

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&result.product.name, width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate_name(&result.product.name, 20),
                // No terminal (pipe), don't truncate
                None => result.product.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str.dimmed(),
                    score_str.bold(),
                    separator,
                    name,
                    separator,
                    result.product.id.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str, score_str, separator, name, separator, result.product.id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one ranked product with its raw and normalized criteria (for verbose mode)
pub fn format_ranking_detail(result: &ScoredResult, use_colors: bool) -> String {
    let p = result.product;
    let n = &result.normalized;
    let header = format!("#{} {}", result.rank, p.name);
    let score = format_score(result.score);

    if use_colors {
        format!(
            concat!(
                "{}\n  Id: {}\n  Score: {}\n",
                "  Profit: {} (normalized {:.4})\n",
                "  Sales: {} (normalized {:.4})\n",
                "  Cost: {} (normalized {:.4})"
            ),
            header.bold(),
            p.id.dimmed(),
            score.green(),
            format_number(p.profit),
            n.profit,
            format_number(p.sales),
            n.sales,
            format_number(p.cost),
            n.cost
        )
    } else {
        format!(
            concat!(
                "{}\n  Id: {}\n  Score: {}\n",
                "  Profit: {} (normalized {:.4})\n",
                "  Sales: {} (normalized {:.4})\n",
                "  Cost: {} (normalized {:.4})"
            ),
            header,
            p.id,
            score,
            format_number(p.profit),
            n.profit,
            format_number(p.sales),
            n.sales,
            format_number(p.cost),
            n.cost
        )
    }
}

/// Format a ranking as tab-separated values for scripting
/// Columns: rank, score, name, id (no headers, no colors)
pub fn format_tsv(results: &[ScoredResult]) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}",
                r.rank,
                format_score(r.score),
                r.product.name,
                r.product.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a ranking as pretty-printed JSON
pub fn format_json(results: &[ScoredResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Format products as one line per product
/// Format: "{name} | profit {p} | sales {s} | cost {c} | {id}"
pub fn format_product_list(products: &[Product], use_colors: bool) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }

    products
        .iter()
        .map(|p| {
            if use_colors {
                format!(
                    "{} | profit {} | sales {} | cost {} | {}",
                    p.name.bold(),
                    format_number(p.profit).green(),
                    format_number(p.sales).cyan(),
                    format_number(p.cost).red(),
                    p.id.dimmed()
                )
            } else {
                format!(
                    "{} | profit {} | sales {} | cost {} | {}",
                    p.name,
                    format_number(p.profit),
                    format_number(p.sales),
                    format_number(p.cost),
                    p.id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the weight configuration with its total and balance status
pub fn format_weights(weights: &Weights, use_colors: bool) -> String {
    let total = format!("{}%", format_total(weights.total()));
    let status = if weights.is_balanced() {
        "ok"
    } else {
        "must be 100% to rank"
    };

    let lines = format!(
        "Profit (benefit): {}%\nSales (benefit):  {}%\nCost (cost):      {}%",
        format_total(weights.profit),
        format_total(weights.sales),
        format_total(weights.cost)
    );

    if use_colors {
        let status = if weights.is_balanced() {
            status.green().to_string()
        } else {
            status.yellow().to_string()
        };
        format!("{}\nTotal: {} ({})", lines, total.bold(), status)
    } else {
        format!("{}\nTotal: {} ({})", lines, total, status)
    }
}

/// Format users as one line per user
/// Format: "{name} <{email}> [{role}] {id}"
pub fn format_user_list(users: &[User], use_colors: bool) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    users
        .iter()
        .map(|u| {
            if use_colors {
                format!(
                    "{} <{}> [{}] {}",
                    u.name.bold(),
                    u.email.cyan(),
                    u.role.yellow(),
                    u.id.dimmed()
                )
            } else {
                format!("{} <{}> [{}] {}", u.name, u.email, u.role, u.id)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
