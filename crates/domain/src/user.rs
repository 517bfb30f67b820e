use crate::shared::entity::{Entity, ID};
use chrono_tz::Tz;
use glucomate_utils::create_random_secret;
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const API_KEY_LEN: usize = 30;

/// The `User` owns all other resources. Signup hands out a
/// `secret_api_key` that authenticates every subsequent request, and the
/// stored phone number and timezone are what the reminder delivery job
/// resolves on every tick.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: PhoneNumber,
    pub timezone: Tz,
    pub secret_api_key: String,
    pub created_at: i64,
}

impl User {
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        phone: PhoneNumber,
        timezone: Tz,
        created_at: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            first_name,
            last_name,
            email,
            phone,
            timezone,
            secret_api_key: create_random_secret(API_KEY_LEN),
            created_at,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// An E.164 phone number: `+`, a nonzero country-code digit, then at most
/// fourteen more digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Error, Debug)]
pub enum InvalidPhoneNumber {
    #[error("Phone number: {0} is not in E.164 format")]
    Malformed(String),
}

impl FromStr for PhoneNumber {
    type Err = InvalidPhoneNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = match s.strip_prefix('+') {
            Some(digits) => digits,
            None => return Err(InvalidPhoneNumber::Malformed(s.to_string())),
        };
        let valid = !digits.is_empty()
            && digits.len() <= 15
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0');
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidPhoneNumber::Malformed(s.to_string()))
        }
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PhoneNumberVisitor;

        impl<'de> Visitor<'de> for PhoneNumberVisitor {
            type Value = PhoneNumber;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("An E.164 phone number")
            }

            fn visit_str<E>(self, value: &str) -> Result<PhoneNumber, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<PhoneNumber>()
                    .map_err(|e| E::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(PhoneNumberVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_e164_numbers() {
        assert!("+12345678901".parse::<PhoneNumber>().is_ok());
        assert!("+4790000000".parse::<PhoneNumber>().is_ok());
        assert!("+1".parse::<PhoneNumber>().is_ok());
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!("12345678901".parse::<PhoneNumber>().is_err());
        assert!("+0123".parse::<PhoneNumber>().is_err());
        assert!("+12a4".parse::<PhoneNumber>().is_err());
        assert!("+".parse::<PhoneNumber>().is_err());
        assert!("+1234567890123456".parse::<PhoneNumber>().is_err());
        assert!("".parse::<PhoneNumber>().is_err());
    }

    #[test]
    fn signup_generates_api_key() {
        let user = User::new(
            "Ada".into(),
            "Lovelace".into(),
            "ada@example.com".into(),
            "+12345678901".parse().unwrap(),
            chrono_tz::UTC,
            0,
        );
        assert_eq!(user.secret_api_key.len(), API_KEY_LEN);
    }
}
