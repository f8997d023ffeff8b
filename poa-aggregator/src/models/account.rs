//! Account details attached to a power of attorney.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account the power of attorney grants access to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub owner: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
    #[serde(with = "date_format")]
    pub created: NaiveDate,
    #[serde(with = "date_format::option", default)]
    pub ended: Option<NaiveDate>,
}

impl Account {
    /// An account is open on `today` when it has no end date or ends strictly
    /// after `today`. Ending today counts as ended.
    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        self.ended.map_or(true, |ended| today < ended)
    }
}

/// `dd-MM-yyyy` dates as used by the account lookup.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| {
                    NaiveDate::parse_from_str(&raw, super::FORMAT).map_err(serde::de::Error::custom)
                })
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn date(day: u32, month: u32, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn account(ended: Option<NaiveDate>) -> Account {
        Account {
            owner: "Geronima".to_string(),
            balance: Decimal::from_str("0.12").unwrap(),
            created: date(31, 10, 2003),
            ended,
        }
    }

    #[test]
    fn reads_upstream_payload() {
        let account: Account = serde_json::from_value(json!({
            "owner": "Geronima",
            "balance": 0.12,
            "created": "31-10-0003",
            "ended": "01-12-2001"
        }))
        .unwrap();

        assert_eq!(account.balance, Decimal::from_str("0.12").unwrap());
        assert_eq!(account.created, date(31, 10, 3));
        assert_eq!(account.ended, Some(date(1, 12, 2001)));
    }

    #[test]
    fn writes_dates_day_first_and_balance_as_number() {
        let value = serde_json::to_value(account(Some(date(1, 12, 2111)))).unwrap();

        assert_eq!(
            value,
            json!({
                "owner": "Geronima",
                "balance": 0.12,
                "created": "31-10-2003",
                "ended": "01-12-2111"
            })
        );
    }

    #[test]
    fn balance_keeps_every_digit() {
        let raw = r#"{"owner":"Gandalf","balance":12345678901234567.89,"created":"01-01-2020","ended":null}"#;

        let account: Account = serde_json::from_str(raw).unwrap();

        assert_eq!(
            account.balance,
            Decimal::from_str("12345678901234567.89").unwrap()
        );
        assert_eq!(serde_json::to_string(&account).unwrap(), raw);
    }

    #[test]
    fn small_balance_is_written_as_plain_number() {
        let written = serde_json::to_string(&account(None)).unwrap();

        assert_eq!(
            written,
            r#"{"owner":"Geronima","balance":0.12,"created":"31-10-2003","ended":null}"#
        );
    }

    #[test]
    fn missing_end_date_reads_as_none() {
        let account: Account = serde_json::from_value(json!({
            "owner": "Frodo",
            "balance": 10,
            "created": "01-01-2020"
        }))
        .unwrap();

        assert_eq!(account.ended, None);
        assert_eq!(account.balance, Decimal::from(10));
    }

    #[test]
    fn rejects_iso_dates() {
        let result = serde_json::from_value::<Account>(json!({
            "owner": "Frodo",
            "balance": 1,
            "created": "2020-01-01"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn open_until_the_day_it_ends() {
        let today = date(17, 10, 2026);

        assert!(account(None).is_open_on(today));
        assert!(account(Some(date(18, 10, 2026))).is_open_on(today));
        assert!(!account(Some(today)).is_open_on(today));
        assert!(!account(Some(date(1, 12, 2001))).is_open_on(today));
    }
}
