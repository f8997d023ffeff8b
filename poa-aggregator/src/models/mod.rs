//! Wire models shared with the downstream lookup services and the API.

mod account;
mod card;
mod power_of_attorney;

pub use account::{date_format, Account};
pub use card::{Card, CardStatus, CreditCard, DebitCard, Limit, PeriodUnit};
pub use power_of_attorney::{
    AggregationResponse, CardReference, CardType, Cards, Direction, PowerOfAttorney,
    PowerOfAttorneyReference,
};
