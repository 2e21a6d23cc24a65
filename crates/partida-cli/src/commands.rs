use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use partida_sdk::{BookFile, Books, EntryDraft, JournalEntry};
use serde_json::json;

use crate::cli::*;
use crate::config::load_config;
use crate::render;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let file = BookFile::load(&cli.books)
        .with_context(|| format!("loading books from {}", cli.books.display()))?;

    match cli.command {
        // Checked as stored, so a damaged file is reported rather than refused.
        Command::Check => cmd_check(&file, &cli.format),
        command => {
            let books = Books::from_book_file(file, config)?;
            run_on_books(&books, command, &cli.books, &cli.format)
        }
    }
}

fn run_on_books(
    books: &Books,
    command: Command,
    books_path: &Path,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match command {
        Command::Check => cmd_check(&books.to_book_file()?, format),
        Command::Diario(args) => cmd_diario(books, args, format),
        Command::Mayor(args) => cmd_mayor(books, args, format),
        Command::Sumas(args) => cmd_sumas(books, args, format),
        Command::Post(args) => cmd_post(books, args, books_path, format),
        Command::Reverse(args) => cmd_reverse(books, args, books_path, format),
    }
}

fn cmd_check(file: &BookFile, format: &OutputFormat) -> anyhow::Result<()> {
    let summary = file.summary();
    match format {
        OutputFormat::Json => print_json(&json!({
            "entries": summary.entry_count,
            "accounts": summary.account_count,
            "totalDebits": summary.total_debits,
            "totalCredits": summary.total_credits,
            "firstDate": summary.first_date,
            "lastDate": summary.last_date,
            "unlistedAccounts": summary.unlisted_accounts,
            "circuits": summary.circuits,
            "valid": summary.validation.is_valid(),
            "violations": summary
                .validation
                .violations
                .iter()
                .map(|v| json!({ "number": v.number, "description": v.description }))
                .collect::<Vec<_>>(),
        }))?,
        OutputFormat::Text => {
            print!("{}", render::summary(&summary));
            if summary.validation.is_valid() {
                println!("{} Journal integrity verified.", "✓".green().bold());
            }
        }
    }
    if !summary.validation.is_valid() {
        bail!(
            "journal has {} integrity violation(s)",
            summary.validation.violations.len()
        );
    }
    Ok(())
}

fn cmd_diario(books: &Books, args: DiarioArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let mut entries = books.diario()?;
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }
    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Text => {
            print!("{}", render::day_book(&entries));
            Ok(())
        }
    }
}

fn cmd_mayor(books: &Books, args: MayorArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let movements = books.mayor(&args.account)?;
    match format {
        OutputFormat::Json => print_json(&movements),
        OutputFormat::Text => {
            let name = books
                .chart()
                .get(&args.account)
                .map(|a| a.name.as_str())
                .unwrap_or_default();
            print!("{}", render::ledger(&args.account, name, &movements));
            Ok(())
        }
    }
}

fn cmd_sumas(books: &Books, args: SumasArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let tb = books.sumas_y_saldos(args.from, args.to, args.circuit)?;
    match format {
        OutputFormat::Json => print_json(&tb),
        OutputFormat::Text => {
            print!("{}", render::trial_balance(&tb));
            Ok(())
        }
    }
}

fn cmd_post(
    books: &Books,
    args: PostArgs,
    books_path: &Path,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let json = fs::read_to_string(&args.entry)
        .with_context(|| format!("reading entry {}", args.entry.display()))?;
    let draft: EntryDraft = serde_json::from_str(&json)
        .with_context(|| format!("parsing entry {}", args.entry.display()))?;
    let entry = books.post(draft)?;
    report_posted(&entry, "Posted", format)?;
    if args.write {
        save(books, books_path)?;
    }
    Ok(())
}

fn cmd_reverse(
    books: &Books,
    args: ReverseArgs,
    books_path: &Path,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let entry = books.reverse(&args.id, args.date)?;
    report_posted(&entry, "Reversed with", format)?;
    if args.write {
        save(books, books_path)?;
    }
    Ok(())
}

fn report_posted(entry: &JournalEntry, verb: &str, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(entry),
        OutputFormat::Text => {
            println!(
                "{} {} entry {}",
                "✓".green().bold(),
                verb,
                format!("#{}", entry.number).yellow()
            );
            println!("  Id: {}", entry.id.to_string().dimmed());
            println!("  Date: {}  Concept: {}", entry.date, entry.concept);
            Ok(())
        }
    }
}

fn save(books: &Books, path: &Path) -> anyhow::Result<()> {
    books
        .to_book_file()?
        .save(path)
        .with_context(|| format!("writing books to {}", path.display()))?;
    println!("  Saved {}", path.display().to_string().bold());
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;

    use super::*;

    const BOOKS: &str = r#"{
        "chart": [
            {"code": "A", "name": "Caja"},
            {"code": "B", "name": "Ventas"}
        ],
        "entries": [
            {
                "id": "01890a5d-ac96-774b-bcce-b302099a8057",
                "number": 1,
                "date": "2026-02-01",
                "concept": "Venta",
                "lines": [
                    {"accountCode": "A", "debit": 1000},
                    {"accountCode": "B", "credit": 1000}
                ]
            },
            {
                "id": "01890a5d-ac96-774b-bcce-b302099a8058",
                "number": 2,
                "date": "2026-02-02",
                "concept": "Venta",
                "lines": [
                    {"accountCode": "A", "debit": 200},
                    {"accountCode": "B", "credit": 200}
                ]
            }
        ]
    }"#;

    fn run(books: &Path, args: &[&str]) -> anyhow::Result<()> {
        let path = books.to_string_lossy().into_owned();
        let mut argv = vec!["partida", "--books", path.as_str()];
        argv.extend_from_slice(args);
        run_command(Cli::try_parse_from(argv)?)
    }

    #[test]
    fn check_passes_on_clean_books() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        fs::write(&path, BOOKS).unwrap();
        run(&path, &["check"]).unwrap();
    }

    #[test]
    fn check_reports_every_violation_of_a_damaged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        let damaged = BOOKS
            .replace(r#""debit": 200"#, r#""debit": 201"#)
            .replace(r#""number": 2"#, r#""number": 5"#);
        fs::write(&path, damaged).unwrap();

        let err = run(&path, &["check", "--format", "json"]).unwrap_err();
        assert!(err.to_string().contains("2 integrity violation(s)"));

        // Other commands still refuse the file outright.
        assert!(run(&path, &["diario"]).is_err());
    }

    #[test]
    fn post_with_write_persists_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        fs::write(&path, BOOKS).unwrap();
        let draft = dir.path().join("entry.json");
        fs::write(
            &draft,
            r#"{"date": "2026-02-03", "concept": "Cobro", "lines": [
                {"accountCode": "A", "debit": 5},
                {"accountCode": "B", "credit": 5}
            ]}"#,
        )
        .unwrap();

        run(&path, &["post", draft.to_str().unwrap(), "--write"]).unwrap();
        let file = BookFile::load(&path).unwrap();
        assert_eq!(file.entries.len(), 3);
        assert_eq!(file.entries[2].number, 3);
        run(&path, &["check"]).unwrap();
    }
}
