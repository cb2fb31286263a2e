use crate::error::CommandError;

/// Currency balance plus the two lifetime counters.
///
/// The balance is unsigned and `debit` refuses to overdraw, so it can never go
/// negative. `lifetime_earned` and `completed` only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    balance: u64,
    lifetime_earned: u64,
    completed: u64,
}

impl Ledger {
    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn lifetime_earned(&self) -> u64 {
        self.lifetime_earned
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Mission payout: counts toward lifetime earnings.
    pub fn credit_earned(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.lifetime_earned = self.lifetime_earned.saturating_add(amount);
    }

    /// Debug grant: raises the balance only.
    pub fn credit_unearned(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.balance >= amount
    }

    pub fn debit(&mut self, amount: u64) -> Result<(), CommandError> {
        if !self.can_afford(amount) {
            return Err(CommandError::InsufficientFunds {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn record_completion(&mut self) {
        self.completed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_refuses_overdraw() {
        let mut ledger = Ledger::default();
        ledger.credit_unearned(30);
        assert_eq!(
            ledger.debit(31),
            Err(CommandError::InsufficientFunds {
                needed: 31,
                available: 30
            })
        );
        assert_eq!(ledger.balance(), 30);
        assert!(ledger.debit(30).is_ok());
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn only_earned_credit_counts_as_lifetime() {
        let mut ledger = Ledger::default();
        ledger.credit_unearned(100);
        ledger.credit_earned(15);
        ledger.debit(50).unwrap();
        assert_eq!(ledger.balance(), 65);
        assert_eq!(ledger.lifetime_earned(), 15);
    }
}
