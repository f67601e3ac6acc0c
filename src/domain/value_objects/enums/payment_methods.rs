use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    Qris,
    Ewallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::Ewallet => "EWALLET",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "CREDIT_CARD" => Some(PaymentMethod::CreditCard),
            "BANK_TRANSFER" => Some(PaymentMethod::BankTransfer),
            "QRIS" => Some(PaymentMethod::Qris),
            "EWALLET" => Some(PaymentMethod::Ewallet),
            _ => None,
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
