use std::fmt::Write;

use colored::Colorize;
use partida_journal::{Figures, JournalEntry, LedgerMovement, TrialBalance};
use partida_sdk::BookSummary;
use rust_decimal::Decimal;

/// Two-decimal rendering of an amount.
pub fn money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

/// Blank for zero, used for the unused side of a line.
fn side(amount: Decimal) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        money(amount)
    }
}

pub fn day_book(entries: &[JournalEntry]) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        out.push_str("No entries.\n");
        return out;
    }
    for entry in entries {
        let circuit = entry
            .circuit
            .as_ref()
            .map(|c| format!(" [{}]", c.as_str().cyan()))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}  {}  {}{}",
            format!("#{}", entry.number).yellow().bold(),
            entry.date,
            entry.concept,
            circuit
        );
        for line in &entry.lines {
            let _ = writeln!(
                out,
                "    {:<16} {:>14} {:>14}  {}",
                line.account.as_str(),
                side(line.debit),
                side(line.credit),
                line.description.as_deref().unwrap_or("").dimmed()
            );
        }
    }
    out
}

pub fn ledger(account: &str, name: &str, movements: &[LedgerMovement]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", account.yellow().bold(), name.bold());
    let _ = writeln!(
        out,
        "{:<10} {:>6}  {:<32} {:>14} {:>14} {:>14}",
        "Date", "#", "Concept", "Debit", "Credit", "Balance"
    );
    for m in movements {
        let _ = writeln!(
            out,
            "{:<10} {:>6}  {:<32} {:>14} {:>14} {:>14}",
            m.date.to_string(),
            m.number,
            truncate(&m.concept, 32),
            side(m.debit),
            side(m.credit),
            money(m.balance)
        );
    }
    if movements.is_empty() {
        out.push_str("No movements.\n");
    }
    out
}

pub fn trial_balance(tb: &TrialBalance) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<28} {:>14} {:>14} {:>14} {:>14}",
        "Code", "Account", "Opening", "Debits", "Credits", "Closing"
    );
    for row in &tb.rows {
        let _ = writeln!(out, "{}", figures_line(row.account.as_str(), &row.name, &row.adjusted));
    }
    let _ = writeln!(out, "{}", figures_line("", "Total", &tb.totals.adjusted).bold());
    if tb.is_balanced() {
        let _ = writeln!(out, "{} debits equal credits", "✓".green().bold());
    } else {
        let _ = writeln!(
            out,
            "{} debits and credits differ (accounts outside the chart?)",
            "✗".red().bold()
        );
    }
    out
}

fn figures_line(code: &str, name: &str, f: &Figures) -> String {
    format!(
        "{:<12} {:<28} {:>14} {:>14} {:>14} {:>14}",
        code,
        truncate(name, 28),
        money(f.opening),
        money(f.debits),
        money(f.credits),
        money(f.closing)
    )
}

pub fn summary(s: &BookSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Entries: {}", s.entry_count.to_string().bold());
    let _ = writeln!(out, "Accounts in chart: {}", s.account_count);
    if let (Some(first), Some(last)) = (s.first_date, s.last_date) {
        let _ = writeln!(out, "Period: {first} .. {last}");
    }
    let total = |amount: Option<Decimal>| amount.map_or_else(|| "overflow".to_string(), money);
    let _ = writeln!(
        out,
        "Debits: {}  Credits: {}",
        total(s.total_debits),
        total(s.total_credits)
    );
    if !s.circuits.is_empty() {
        let names: Vec<_> = s.circuits.iter().map(|c| c.as_str()).collect();
        let _ = writeln!(out, "Circuits: {}", names.join(", ").cyan());
    }
    for code in &s.unlisted_accounts {
        let _ = writeln!(
            out,
            "  {} account {} is posted to but not in the chart",
            "warning:".yellow(),
            code
        );
    }
    for v in &s.validation.violations {
        let _ = writeln!(out, "  {} #{}: {}", "violation:".red(), v.number, v.description);
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
