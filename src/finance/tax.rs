use super::transactions::{Category, Transaction};
use crate::types::Toast;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::info;

pub const RETRIEVE_DELAY: Duration = Duration::from_millis(2000);
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);

const PROFESSIONAL_WORDS: &[&str] = &["work", "laptop", "office"];

/// Expenses that count as professional expenditure: work-related names, or
/// anything left unclassified.
pub fn professional_expenses(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|tx| {
            let name = tx.name.to_lowercase();
            tx.is_expense()
                && (PROFESSIONAL_WORDS.iter().any(|w| name.contains(w))
                    || tx.category == Category::Other)
        })
        .collect()
}

pub fn professional_total(expenses: &[&Transaction]) -> i64 {
    expenses.iter().map(|tx| tx.amount_cents.abs()).sum()
}

pub fn net_income(transactions: &[Transaction]) -> i64 {
    transactions.iter().map(|tx| tx.amount_cents).sum()
}

/// Eight-digit display tax number.
pub fn generate_tax_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(10_000_000u32..100_000_000).to_string()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaxStatementState {
    #[default]
    Idle,
    Retrieving,
    Retrieved { net_income_cents: i64 },
    Submitting { net_income_cents: i64 },
    Submitted { net_income_cents: i64 },
}

/// The simulated retrieve-then-submit flow of the tax statement screen.
///
/// The delay is injected so callers can use whatever timer their runtime has.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaxStatementFlow {
    state: TaxStatementState,
}

impl TaxStatementFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TaxStatementState {
        self.state
    }

    pub fn net_income(&self) -> Option<i64> {
        match self.state {
            TaxStatementState::Retrieved { net_income_cents }
            | TaxStatementState::Submitting { net_income_cents }
            | TaxStatementState::Submitted { net_income_cents } => Some(net_income_cents),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            TaxStatementState::Retrieving | TaxStatementState::Submitting { .. }
        )
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.state, TaxStatementState::Retrieved { .. })
    }

    pub async fn retrieve<F, Fut>(&mut self, transactions: &[Transaction], delay: F) -> Toast
    where
        F: FnOnce(Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.state = TaxStatementState::Retrieving;
        delay(RETRIEVE_DELAY).await;

        let net_income_cents = net_income(transactions);
        info!(net_income_cents, "tax information retrieved");
        self.state = TaxStatementState::Retrieved { net_income_cents };
        Toast::new(
            "Tax information retrieved",
            "Your tax information has been successfully retrieved.",
        )
    }

    /// Returns `None` when nothing has been retrieved yet.
    pub async fn submit<F, Fut>(&mut self, delay: F) -> Option<Toast>
    where
        F: FnOnce(Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        let net_income_cents = self.net_income()?;
        self.state = TaxStatementState::Submitting { net_income_cents };
        delay(SUBMIT_DELAY).await;

        info!("tax statement submitted");
        self.state = TaxStatementState::Submitted { net_income_cents };
        Some(Toast::new(
            "Tax Statement Submitted",
            "Your tax statement has been successfully submitted for review.",
        ))
    }
}
