use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quick-select amounts offered by the top-up menu.
pub const PRESET_AMOUNTS: [f64; 4] = [5.0, 10.0, 20.0, 50.0];

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum WalletError {
    #[error("please select or enter an amount to add")]
    NonPositiveAmount,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TopUp {
    pub amount: f64,
    pub at: DateTime<Utc>,
}

/// Simulated wallet: a balance plus a timestamped top-up ledger. No real
/// money moves anywhere.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Wallet {
    pub balance: f64,
    pub ledger: Vec<TopUp>,
}

impl Wallet {
    /// Adds funds and returns the new balance. Zero, negative and NaN
    /// amounts are rejected.
    pub fn top_up(&mut self, amount: f64) -> Result<f64, WalletError> {
        if !(amount > 0.0) {
            return Err(WalletError::NonPositiveAmount);
        }
        self.balance += amount;
        self.ledger.push(TopUp {
            amount,
            at: Utc::now(),
        });
        Ok(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_ups_accumulate() {
        let mut wallet = Wallet::default();
        assert_eq!(wallet.top_up(20.0), Ok(20.0));
        assert_eq!(wallet.top_up(5.5), Ok(25.5));
        assert_eq!(wallet.ledger.len(), 2);
        assert_eq!(wallet.ledger[0].amount, 20.0);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut wallet = Wallet::default();
        assert_eq!(wallet.top_up(0.0), Err(WalletError::NonPositiveAmount));
        assert_eq!(wallet.top_up(-10.0), Err(WalletError::NonPositiveAmount));
        assert_eq!(wallet.top_up(f64::NAN), Err(WalletError::NonPositiveAmount));
        assert_eq!(wallet.balance, 0.0);
        assert!(wallet.ledger.is_empty());
    }
}
