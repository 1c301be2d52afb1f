use once_cell::sync::Lazy;
use std::fmt;
use time::format_description::FormatItem;
use time::macros::{date, format_description};
use time::Date;

const DATE_LABEL_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Income,
    Groceries,
    Rent,
    Utilities,
    Transportation,
    Leisure,
    Shopping,
    Health,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Income,
        Category::Groceries,
        Category::Rent,
        Category::Utilities,
        Category::Transportation,
        Category::Leisure,
        Category::Shopping,
        Category::Health,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Groceries => "Groceries",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Transportation => "Transportation",
            Category::Leisure => "Leisure",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    /// Lowercase name fragments that classify a transaction into this category.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            Category::Income => &[
                "salary", "income", "payment", "bonus", "dividend", "project", "freelance", "refund",
            ],
            Category::Groceries => &["grocery", "supermarket", "food", "market"],
            Category::Rent => &["rent", "mortgage", "housing"],
            Category::Utilities => &["utility", "electric", "water", "gas", "internet", "phone"],
            Category::Transportation => &[
                "transport", "uber", "taxi", "bus", "train", "fuel", "gas station",
            ],
            Category::Leisure => &[
                "restaurant", "bar", "cinema", "movie", "theater", "concert", "vacation",
            ],
            Category::Shopping => &[
                "shopping", "amazon", "online", "store", "retail", "gift", "electronics",
            ],
            Category::Health => &[
                "health", "medical", "doctor", "pharmacy", "gym", "fitness", "healthcare",
            ],
            Category::Entertainment => &["entertainment", "subscription", "netflix", "spotify", "game"],
            Category::Other => &[],
        }
    }

    /// Chart colour.
    pub fn color(self) -> &'static str {
        match self {
            Category::Income => "#4ade80",
            Category::Groceries => "#fbbf24",
            Category::Rent => "#7c3aed",
            Category::Utilities => "#38bdf8",
            Category::Transportation => "#8b5cf6",
            Category::Leisure => "#ec4899",
            Category::Shopping => "#f87171",
            Category::Health => "#10b981",
            Category::Entertainment => "#6366f1",
            Category::Other => "#94a3b8",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const INCOME_WORDS: &[&str] = &["salary", "income", "dividend", "bonus"];

/// Classify by name: income words first, then category patterns in
/// declaration order, `Other` when nothing matches.
pub fn classify_transaction(name: &str) -> Category {
    let name = name.to_lowercase();
    if INCOME_WORDS.iter().any(|w| name.contains(w)) {
        return Category::Income;
    }

    Category::ALL
        .into_iter()
        .find(|category| category.patterns().iter().any(|p| name.contains(p)))
        .unwrap_or(Category::Other)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    /// Signed amount in euro cents; negative for expenses.
    pub amount_cents: i64,
    pub formatted_amount: String,
    pub date_label: String,
    pub date: Date,
    /// Midnight UTC of `date`, in milliseconds.
    pub timestamp_ms: i64,
    pub category: Category,
    pub kind: TransactionKind,
}

impl Transaction {
    /// Build a transaction the way new entries are recorded: positive amounts
    /// are income, everything else is a negative expense classified by name.
    pub fn create(id: impl Into<String>, name: impl Into<String>, amount_cents: i64, date: Date) -> Self {
        let name = name.into();
        if amount_cents > 0 {
            Self::build(id.into(), name, amount_cents, date, Category::Income, TransactionKind::Income)
        } else {
            let category = classify_transaction(&name);
            Self::build(id.into(), name, -amount_cents.abs(), date, category, TransactionKind::Expense)
        }
    }

    fn build(
        id: String,
        name: String,
        amount_cents: i64,
        date: Date,
        category: Category,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            formatted_amount: format_amount(amount_cents),
            date_label: date.format(DATE_LABEL_FORMAT).unwrap_or_default(),
            timestamp_ms: date.midnight().assume_utc().unix_timestamp() * 1000,
            name,
            amount_cents,
            date,
            category,
            kind,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Signed list format: `+2,450.00 €`, `-42.75 €`.
pub fn format_amount(cents: i64) -> String {
    let sign = match cents.signum() {
        1 => "+",
        -1 => "-",
        _ => "",
    };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02} €", group_thousands(abs / 100, ','), abs % 100)
}

/// German currency format used for balances: `15.401,98 €`, `-42,75 €`.
pub fn format_eur(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{},{:02} €", group_thousands(abs / 100, '.'), abs % 100)
}

type SeedRow = (&'static str, &'static str, i64, Date, Category);

const SEED: &[SeedRow] = &[
    ("t1", "Salary", 245_000, date!(2025 - 05 - 05), Category::Income),
    ("t2", "Grocery Store", -4_275, date!(2025 - 05 - 08), Category::Groceries),
    ("t3", "Restaurant", -6_850, date!(2025 - 05 - 03), Category::Leisure),
    ("t4", "Online Shopping", -12_999, date!(2025 - 05 - 01), Category::Shopping),
    ("t5", "Transport", -3_200, date!(2025 - 04 - 29), Category::Transportation),
    ("t6", "Rent", -80_000, date!(2025 - 04 - 28), Category::Rent),
    ("t7", "Side Project", 35_000, date!(2025 - 04 - 25), Category::Income),
    ("t8", "Utilities", -12_000, date!(2025 - 04 - 22), Category::Utilities),
    ("t9", "Gym Membership", -4_500, date!(2025 - 04 - 20), Category::Health),
    ("t10", "Dividend Payment", 6_525, date!(2025 - 04 - 18), Category::Income),
    ("t11", "Subscription Services", -2_999, date!(2025 - 04 - 15), Category::Entertainment),
    ("t12", "Bonus", 30_000, date!(2025 - 04 - 10), Category::Income),
    ("t13", "Salary", 240_000, date!(2025 - 03 - 05), Category::Income),
    ("t14", "Rent", -80_000, date!(2025 - 03 - 01), Category::Rent),
    ("t15", "Groceries", -15_675, date!(2025 - 02 - 25), Category::Groceries),
    ("t16", "Utilities", -13_250, date!(2025 - 02 - 20), Category::Utilities),
    ("t17", "Salary", 240_000, date!(2025 - 02 - 05), Category::Income),
    ("t18", "Restaurant", -8_720, date!(2025 - 01 - 28), Category::Leisure),
    ("t19", "Rent", -80_000, date!(2025 - 01 - 01), Category::Rent),
    ("t20", "Salary", 240_000, date!(2025 - 01 - 05), Category::Income),
    ("t21", "Transportation Monthly Pass", -7_500, date!(2024 - 12 - 28), Category::Transportation),
    ("t22", "Holiday Bonus", 50_000, date!(2024 - 12 - 20), Category::Income),
    ("t23", "Salary", 240_000, date!(2024 - 12 - 05), Category::Income),
    ("t24", "Rent", -80_000, date!(2024 - 12 - 01), Category::Rent),
    ("t25", "Shopping", -24_530, date!(2024 - 11 - 25), Category::Shopping),
    ("t26", "Salary", 240_000, date!(2024 - 11 - 05), Category::Income),
    ("t27", "Rent", -80_000, date!(2024 - 11 - 01), Category::Rent),
    ("t28", "Groceries", -14_280, date!(2024 - 10 - 28), Category::Groceries),
    ("t29", "Salary", 240_000, date!(2024 - 10 - 05), Category::Income),
    ("t30", "Rent", -80_000, date!(2024 - 10 - 01), Category::Rent),
    ("t31", "Healthcare", -12_050, date!(2024 - 09 - 25), Category::Health),
    ("t32", "Salary", 240_000, date!(2024 - 09 - 05), Category::Income),
    ("t33", "Rent", -80_000, date!(2024 - 09 - 01), Category::Rent),
    ("t34", "Summer Vacation", -75_000, date!(2024 - 08 - 15), Category::Leisure),
    ("t35", "Salary", 240_000, date!(2024 - 08 - 05), Category::Income),
    ("t36", "Rent", -80_000, date!(2024 - 08 - 01), Category::Rent),
    ("t37", "Electronics", -39_999, date!(2024 - 07 - 20), Category::Shopping),
    ("t38", "Salary", 240_000, date!(2024 - 07 - 05), Category::Income),
    ("t39", "Rent", -80_000, date!(2024 - 07 - 01), Category::Rent),
    ("t40", "Birthday Gift", -8_500, date!(2024 - 06 - 15), Category::Shopping),
    ("t41", "Salary", 240_000, date!(2024 - 06 - 05), Category::Income),
    ("t42", "Rent", -80_000, date!(2024 - 06 - 01), Category::Rent),
    ("t43", "Work Laptop", -160_000, date!(2025 - 06 - 10), Category::Other),
];

/// The account's transaction history, in insertion order. Never mutated.
pub static TRANSACTIONS: Lazy<Vec<Transaction>> = Lazy::new(|| {
    SEED.iter()
        .map(|&(id, name, cents, date, category)| {
            let kind = if cents < 0 {
                TransactionKind::Expense
            } else {
                TransactionKind::Income
            };
            Transaction::build(id.to_string(), name.to_string(), cents, date, category, kind)
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_matches_kind_for_every_seed_row() {
        assert_eq!(TRANSACTIONS.len(), 43);
        for tx in TRANSACTIONS.iter() {
            assert_eq!(tx.amount_cents < 0, tx.kind == TransactionKind::Expense, "{}", tx.id);
            assert!(Category::ALL.contains(&tx.category));
        }
    }

    #[test]
    fn classifier_follows_pattern_order() {
        assert_eq!(classify_transaction("Monthly Salary"), Category::Income);
        assert_eq!(classify_transaction("Grocery Store"), Category::Groceries);
        assert_eq!(classify_transaction("Gym Membership"), Category::Health);
        assert_eq!(classify_transaction("Netflix"), Category::Entertainment);
        assert_eq!(classify_transaction("Uber ride"), Category::Transportation);
        assert_eq!(classify_transaction("Work Laptop"), Category::Other);
    }

    #[test]
    fn create_signs_and_classifies() {
        let expense = Transaction::create("n1", "Cinema night", -2_450, date!(2025 - 05 - 09));
        assert_eq!(expense.amount_cents, -2_450);
        assert_eq!(expense.kind, TransactionKind::Expense);
        assert_eq!(expense.category, Category::Leisure);
        assert_eq!(expense.formatted_amount, "-24.50 €");
        assert_eq!(expense.date_label, "May 9, 2025");

        let income = Transaction::create("n2", "Cinema refund", 1_000, date!(2025 - 05 - 10));
        assert_eq!(income.kind, TransactionKind::Income);
        assert_eq!(income.category, Category::Income);
        assert_eq!(income.formatted_amount, "+10.00 €");
    }

    #[test]
    fn create_treats_positive_amounts_as_income_regardless_of_name() {
        let tx = Transaction::create("n4", "Grocery Store", 3_200, date!(2025 - 05 - 11));
        assert_eq!(tx.amount_cents, 3_200);
        assert_eq!(tx.kind, TransactionKind::Income);
        assert_eq!(tx.category, Category::Income);
        assert!(!tx.is_expense());
    }

    #[test]
    fn create_records_zero_as_a_classified_expense() {
        let tx = Transaction::create("n5", "Grocery Store", 0, date!(2025 - 05 - 12));
        assert_eq!(tx.amount_cents, 0);
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.category, Category::Groceries);
        assert!(tx.is_expense());
    }

    #[test]
    fn timestamps_are_utc_midnight_millis() {
        let tx = Transaction::create("n3", "Salary", 100, date!(1970 - 01 - 02));
        assert_eq!(tx.timestamp_ms, 86_400_000);
    }

    #[test]
    fn amount_formats() {
        assert_eq!(format_amount(245_000), "+2,450.00 €");
        assert_eq!(format_amount(-160_000), "-1,600.00 €");
        assert_eq!(format_amount(0), "0.00 €");
        assert_eq!(format_eur(1_540_198), "15.401,98 €");
        assert_eq!(format_eur(-4_275), "-42,75 €");
        assert_eq!(format_eur(123_456_789), "1.234.567,89 €");
    }
}
