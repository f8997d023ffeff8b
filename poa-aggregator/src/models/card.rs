//! Card details returned by the credit and debit card lookups.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    Active,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodUnit {
    PerDay,
    PerWeek,
    PerMonth,
}

/// Spending limit over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Limit {
    pub limit: u32,
    pub period_unit: PeriodUnit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebitCard {
    pub id: String,
    pub card_number: u32,
    pub sequence_number: u32,
    pub card_holder: String,
    pub atm_limit: Limit,
    pub pos_limit: Limit,
    pub contactless: bool,
    pub status: CardStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    pub card_number: u32,
    pub sequence_number: u32,
    pub card_holder: String,
    pub monthly_limit: u32,
    pub status: CardStatus,
}

/// Common view over credit and debit cards.
pub trait Card {
    fn status(&self) -> CardStatus;

    fn is_active(&self) -> bool {
        self.status() == CardStatus::Active
    }
}

impl Card for DebitCard {
    fn status(&self) -> CardStatus {
        self.status
    }
}

impl Card for CreditCard {
    fn status(&self) -> CardStatus {
        self.status
    }
}
