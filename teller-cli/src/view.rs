//! Result views: search/account filtering, column sorting, table
//! rendering, and income/expense totals.

use clap::{Args, ValueEnum};
use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};

use teller_core::Transaction;

#[derive(Args, Debug, Clone, Default)]
pub struct FilterOpts {
    /// Case-insensitive search across description, date, type, amount
    /// string, and account
    #[arg(long)]
    pub search: Option<String>,

    /// Only show transactions for this exact account label
    #[arg(long)]
    pub account: Option<String>,

    /// Sort column
    #[arg(long, value_enum)]
    pub sort: Option<SortColumn>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Date,
    Account,
    Description,
    Type,
    Amount,
}

/// Apply search/account filters and the requested sort.
pub fn apply_filters<'a>(
    transactions: &'a [Transaction],
    opts: &FilterOpts,
) -> Vec<&'a Transaction> {
    let query = opts
        .search
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let mut rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| match &opts.account {
            Some(account) => &t.account == account,
            None => true,
        })
        .filter(|t| match &query {
            Some(q) => matches_query(t, q),
            None => true,
        })
        .collect();

    if let Some(column) = opts.sort {
        sort_rows(&mut rows, column);
        if opts.desc {
            rows.reverse();
        }
    }
    rows
}

fn matches_query(t: &Transaction, query: &str) -> bool {
    t.description.to_lowercase().contains(query)
        || t.date.to_lowercase().contains(query)
        || t.kind.to_lowercase().contains(query)
        || t.amount_str.contains(query)
        || t.account.to_lowercase().contains(query)
}

fn sort_rows(rows: &mut [&Transaction], column: SortColumn) {
    match column {
        SortColumn::Date => rows.sort_by_key(|t| date_sort_key(&t.date)),
        SortColumn::Account => rows.sort_by_key(|t| t.account.to_lowercase()),
        SortColumn::Description => rows.sort_by_key(|t| t.description.to_lowercase()),
        SortColumn::Type => rows.sort_by_key(|t| t.kind.to_lowercase()),
        SortColumn::Amount => rows.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
    }
}

/// Ordinal key for "Jan 22"-style dates: month * 100 + day.
fn date_sort_key(date: &str) -> u32 {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let mut parts = date.split_whitespace();
    let month = parts
        .next()
        .map(|m| m.to_lowercase())
        .and_then(|m| MONTHS.iter().position(|c| m.starts_with(c)))
        .unwrap_or(0) as u32;
    let day: u32 = parts.next().and_then(|d| d.parse().ok()).unwrap_or(0);
    month * 100 + day
}

pub fn print_table(rows: &[&Transaction]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(["Date", "Account", "Description", "Type", "Amount"]);
    for t in rows {
        table.add_row(vec![
            Cell::new(&t.date),
            Cell::new(&t.account),
            Cell::new(&t.description),
            Cell::new(&t.kind),
            Cell::new(&t.amount_str).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

/// Income/expense totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Totals {
    pub fn net(&self) -> f64 {
        self.income + self.expense
    }
}

pub fn totals(rows: &[&Transaction]) -> Totals {
    let mut out = Totals::default();
    for t in rows {
        if t.amount > 0.0 {
            out.income += t.amount;
        } else {
            out.expense += t.amount;
        }
    }
    out
}

pub fn print_totals(label: &str, totals: &Totals) {
    println!(
        "{label}: income +${:.2}  expense -${:.2}  net {}{:.2}",
        totals.income,
        totals.expense.abs(),
        if totals.net() >= 0.0 { "+$" } else { "-$" },
        totals.net().abs(),
    );
}
