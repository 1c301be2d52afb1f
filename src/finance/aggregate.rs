use super::transactions::{Category, Transaction};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use time::{Date, Duration, Month};

/// Opening balance the monthly chart starts counting from.
pub const STARTING_BALANCE_CENTS: i64 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u8,
}

impl MonthKey {
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month().into(),
        }
    }
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `May 25`
impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = MONTH_ABBREVIATIONS
            .get(usize::from(self.month).wrapping_sub(1))
            .copied()
            .unwrap_or("???");
        write!(f, "{name} {:02}", self.year.rem_euclid(100))
    }
}

pub fn total_balance(transactions: &[Transaction]) -> i64 {
    transactions.iter().map(|tx| tx.amount_cents).sum()
}

/// The `n` newest transactions, newest first. Ties keep insertion order.
pub fn recent(transactions: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
    sorted.truncate(n);
    sorted
}

/// Group by calendar day, keeping the order in which each day first appears.
pub fn group_by_day<'a>(transactions: &[&'a Transaction]) -> Vec<(Date, Vec<&'a Transaction>)> {
    let mut groups: Vec<(Date, Vec<&'a Transaction>)> = Vec::new();
    for &tx in transactions {
        match groups.iter_mut().find(|(day, _)| *day == tx.date) {
            Some((_, items)) => items.push(tx),
            None => groups.push((tx.date, vec![tx])),
        }
    }
    groups
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub income_cents: i64,
    pub expenses_cents: i64,
    /// Running balance at the end of the month, from `STARTING_BALANCE_CENTS`.
    pub balance_cents: i64,
}

pub fn aggregate_by_month(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<MonthKey, (i64, i64)> = BTreeMap::new();
    for tx in transactions {
        let entry = months.entry(MonthKey::of(tx.date)).or_default();
        if tx.is_expense() {
            entry.1 += tx.amount_cents.abs();
        } else {
            entry.0 += tx.amount_cents;
        }
    }

    let mut running = STARTING_BALANCE_CENTS;
    months
        .into_iter()
        .map(|(month, (income_cents, expenses_cents))| {
            running += income_cents - expenses_cents;
            MonthlySummary {
                month,
                income_cents,
                expenses_cents,
                balance_cents: running,
            }
        })
        .collect()
}

/// Per-month, per-category totals for the category chart.
///
/// Expenses count by absolute value; positive amounts only count toward
/// `Income`. Every transaction opens its month even when it adds nothing, so
/// feeding transactions one at a time ends in the same state as `rescan`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    categories: BTreeSet<Category>,
    months: BTreeMap<MonthKey, BTreeMap<Category, i64>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRow {
    pub month: MonthKey,
    /// One value per entry of `CategoryTotals::categories`, zero-filled.
    pub values: Vec<i64>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from scratch: group by month first, then sum each category.
    pub fn rescan<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let transactions: Vec<&Transaction> = transactions.into_iter().collect();
        let categories = transactions.iter().map(|tx| tx.category).collect();

        let by_month = transactions.iter().fold(
            BTreeMap::<MonthKey, Vec<&Transaction>>::new(),
            |mut acc, tx| {
                acc.entry(MonthKey::of(tx.date)).or_default().push(tx);
                acc
            },
        );

        let months = by_month
            .into_iter()
            .map(|(key, txs)| {
                let expenses = txs
                    .iter()
                    .filter(|tx| tx.is_expense())
                    .map(|tx| (tx.category, tx.amount_cents.abs()));
                let income = txs
                    .iter()
                    .filter(|tx| !tx.is_expense() && tx.category == Category::Income)
                    .map(|tx| (tx.category, tx.amount_cents));
                let mut amounts = BTreeMap::new();
                for (category, cents) in expenses.chain(income) {
                    *amounts.entry(category).or_insert(0) += cents;
                }
                (key, amounts)
            })
            .collect();

        Self { categories, months }
    }

    pub fn add(&mut self, tx: &Transaction) {
        self.categories.insert(tx.category);
        let month = self.months.entry(MonthKey::of(tx.date)).or_default();

        let amount = if tx.is_expense() {
            tx.amount_cents.abs()
        } else if tx.category == Category::Income {
            tx.amount_cents
        } else {
            return;
        };
        *month.entry(tx.category).or_insert(0) += amount;
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied()
    }

    pub fn month(&self, key: MonthKey) -> Option<&BTreeMap<Category, i64>> {
        self.months.get(&key)
    }

    pub fn month_total(&self, key: MonthKey) -> i64 {
        self.month(key).map(|m| m.values().sum()).unwrap_or(0)
    }

    pub fn chart_rows(&self) -> Vec<CategoryRow> {
        self.months
            .iter()
            .map(|(&month, amounts)| CategoryRow {
                month,
                values: self
                    .categories
                    .iter()
                    .map(|c| amounts.get(c).copied().unwrap_or(0))
                    .collect(),
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalancePoint {
    pub date: Date,
    pub timestamp_ms: i64,
    pub balance_cents: i64,
}

/// Cumulative balance after each transaction in time order, starting at zero.
pub fn running_balance(transactions: &[Transaction]) -> Vec<BalancePoint> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|tx| tx.timestamp_ms);

    let mut total = 0;
    sorted
        .into_iter()
        .map(|tx| {
            total += tx.amount_cents;
            BalancePoint {
                date: tx.date,
                timestamp_ms: tx.timestamp_ms,
                balance_cents: total,
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimePeriod {
    OneDay,
    OneWeek,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    #[default]
    Max,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 7] = [
        TimePeriod::OneDay,
        TimePeriod::OneWeek,
        TimePeriod::OneMonth,
        TimePeriod::ThreeMonths,
        TimePeriod::SixMonths,
        TimePeriod::OneYear,
        TimePeriod::Max,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimePeriod::OneDay => "1D",
            TimePeriod::OneWeek => "1W",
            TimePeriod::OneMonth => "1M",
            TimePeriod::ThreeMonths => "3M",
            TimePeriod::SixMonths => "6M",
            TimePeriod::OneYear => "1Y",
            TimePeriod::Max => "Max",
        }
    }

    /// Earliest date still inside the window ending at `today`; `None` for `Max`.
    pub fn cutoff(self, today: Date) -> Option<Date> {
        match self {
            TimePeriod::OneDay => today.checked_sub(Duration::days(1)),
            TimePeriod::OneWeek => today.checked_sub(Duration::days(7)),
            TimePeriod::OneMonth => months_back(today, 1),
            TimePeriod::ThreeMonths => months_back(today, 3),
            TimePeriod::SixMonths => months_back(today, 6),
            TimePeriod::OneYear => months_back(today, 12),
            TimePeriod::Max => None,
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Same day `n` months earlier, clamped to the end of a shorter month.
fn months_back(date: Date, n: i32) -> Option<Date> {
    let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - n;
    let year = index.div_euclid(12);
    let month = Month::try_from(u8::try_from(index.rem_euclid(12) + 1).ok()?).ok()?;
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).ok()
}

pub fn filter_by_period(transactions: &[Transaction], period: TimePeriod, today: Date) -> Vec<Transaction> {
    match period.cutoff(today) {
        Some(cutoff) => transactions
            .iter()
            .filter(|tx| tx.date >= cutoff)
            .cloned()
            .collect(),
        None => transactions.to_vec(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SankeyLink {
    pub source: usize,
    pub target: usize,
    pub value_cents: i64,
}

/// Income on the left, one node per expense category on the right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SankeyData {
    pub nodes: Vec<String>,
    pub links: Vec<SankeyLink>,
}

pub fn sankey(transactions: &[Transaction]) -> SankeyData {
    let mut expenses: Vec<(Category, i64)> = Vec::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        match expenses.iter_mut().find(|(c, _)| *c == tx.category) {
            Some((_, total)) => *total += tx.amount_cents.abs(),
            None => expenses.push((tx.category, tx.amount_cents.abs())),
        }
    }

    let mut nodes = vec![Category::Income.label().to_string()];
    let mut links = Vec::with_capacity(expenses.len());
    for (category, value_cents) in expenses {
        nodes.push(category.label().to_string());
        links.push(SankeyLink {
            source: 0,
            target: nodes.len() - 1,
            value_cents,
        });
    }
    SankeyData { nodes, links }
}
