//! Power of attorney records, before and after aggregation.

use super::{Account, CreditCard, DebitCard};
use serde::{Deserialize, Serialize};

/// Number of trailing characters of the account identifier used as the
/// account lookup key.
const ACCOUNT_KEY_LEN: usize = 9;

/// Entry of the upstream power of attorney listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerOfAttorneyReference {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Given,
    Received,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    DebitCard,
    CreditCard,
}

/// Card that still has to be looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardReference {
    pub id: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
}

/// Grant of authority over an account from a grantor to a grantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PowerOfAttorneyPayload")]
pub struct PowerOfAttorney {
    pub id: String,
    pub grantor: String,
    pub grantee: String,
    /// Raw account identifier, e.g. `NL23RABO123456789`.
    pub account: String,
    pub direction: Direction,
    pub authorizations: Vec<String>,
    #[serde(flatten)]
    pub cards: Cards,
}

/// Card and account data of a record.
///
/// The detail lookup yields `Unresolved`; aggregation replaces it with
/// `Resolved`. Both forms are written inline into the record object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cards {
    Unresolved {
        cards: Vec<CardReference>,
    },
    #[serde(rename_all = "camelCase")]
    Resolved {
        #[serde(skip_serializing_if = "Option::is_none")]
        credit_cards: Option<Vec<CreditCard>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        debit_cards: Option<Vec<DebitCard>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        account_details: Option<Account>,
    },
}

/// Record as it appears on the wire, before the card form is decided.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PowerOfAttorneyPayload {
    id: String,
    grantor: String,
    grantee: String,
    account: String,
    direction: Direction,
    authorizations: Vec<String>,
    cards: Option<Vec<CardReference>>,
    credit_cards: Option<Vec<CreditCard>>,
    debit_cards: Option<Vec<DebitCard>>,
    account_details: Option<Account>,
}

impl TryFrom<PowerOfAttorneyPayload> for PowerOfAttorney {
    type Error = String;

    fn try_from(payload: PowerOfAttorneyPayload) -> Result<Self, Self::Error> {
        let resolved = payload.credit_cards.is_some()
            || payload.debit_cards.is_some()
            || payload.account_details.is_some();

        let cards = match payload.cards {
            Some(_) if resolved => {
                return Err(format!(
                    "power of attorney {} carries both card references and resolved details",
                    payload.id
                ))
            }
            Some(cards) => Cards::Unresolved { cards },
            None => Cards::Resolved {
                credit_cards: payload.credit_cards,
                debit_cards: payload.debit_cards,
                account_details: payload.account_details,
            },
        };

        Ok(Self {
            id: payload.id,
            grantor: payload.grantor,
            grantee: payload.grantee,
            account: payload.account,
            direction: payload.direction,
            authorizations: payload.authorizations,
            cards,
        })
    }
}

impl Cards {
    /// Resolved form with nothing attached; what a record without a `cards`
    /// field reads as.
    pub fn empty() -> Self {
        Cards::Resolved {
            credit_cards: None,
            debit_cards: None,
            account_details: None,
        }
    }
}

impl PowerOfAttorney {
    /// Card references awaiting lookup, `None` when the record has none to resolve.
    pub fn card_references(&self) -> Option<&[CardReference]> {
        match &self.cards {
            Cards::Unresolved { cards } => Some(cards),
            Cards::Resolved { .. } => None,
        }
    }

    /// Account lookup key: the last nine characters of the account identifier,
    /// or the whole identifier when shorter. Bank prefixes such as `NL23RABO`
    /// are dropped this way; the identifier is not otherwise validated.
    pub fn account_key(&self) -> &str {
        let start = self
            .account
            .char_indices()
            .rev()
            .nth(ACCOUNT_KEY_LEN - 1)
            .map_or(0, |(index, _)| index);
        &self.account[start..]
    }

    /// Replaces the card references with looked-up details.
    pub fn resolve(
        self,
        credit_cards: Option<Vec<CreditCard>>,
        debit_cards: Option<Vec<DebitCard>>,
        account_details: Option<Account>,
    ) -> Self {
        Self {
            cards: Cards::Resolved {
                credit_cards,
                debit_cards,
                account_details,
            },
            ..self
        }
    }
}

/// Body of the batch endpoint. `powersOfAttorney` is `null` when the listing
/// itself could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResponse {
    #[serde(rename = "powersOfAttorney")]
    pub powers_of_attorney: Option<Vec<PowerOfAttorney>>,
}
