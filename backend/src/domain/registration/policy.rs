//! Tunable bounds consumed by the registration rules.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Default minimum name length, in characters.
pub const NAME_LENGTH_MIN: usize = 2;
/// Default maximum name length, in characters.
pub const NAME_LENGTH_MAX: usize = 50;
/// Default minimum age, in years.
pub const AGE_MIN: u8 = 13;
/// Default maximum age, in years.
pub const AGE_MAX: u8 = 120;

/// Disposable mailbox providers rejected unless configuration overrides them.
pub const DEFAULT_BLOCKED_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "tempmail.org",
    "guerrillamail.com",
    "mailinator.com",
    "yopmail.com",
    "temp-mail.org",
    "sharklasers.com",
    "grr.la",
    "guerrillamailblock.com",
    "guerrillamail.net",
    "guerrillamail.org",
];

/// Inconsistent bounds passed to [`ValidationPolicy::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// Name bounds must satisfy `0 < min < max`.
    #[error("name length bounds must satisfy 0 < min < max (got {min}..={max})")]
    NameLength {
        /// Requested minimum.
        min: usize,
        /// Requested maximum.
        max: usize,
    },
    /// Age bounds must satisfy `0 < min < max`.
    #[error("age bounds must satisfy 0 < min < max (got {min}..={max})")]
    AgeRange {
        /// Requested minimum.
        min: u8,
        /// Requested maximum.
        max: u8,
    },
}

/// Bounds and block-list applied by the validator.
///
/// ## Invariants
/// - Both ranges are non-empty with a positive lower bound.
/// - Blocked domains are stored trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    name_length: RangeInclusive<usize>,
    age: RangeInclusive<u8>,
    blocked_domains: BTreeSet<String>,
}

impl ValidationPolicy {
    /// Build a policy with the default block-list.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::registration::ValidationPolicy;
    ///
    /// let policy = ValidationPolicy::new(2..=50, 18..=99).expect("valid bounds");
    /// assert_eq!(*policy.age().start(), 18);
    /// assert!(policy.is_blocked_domain("Mailinator.com"));
    /// ```
    pub fn new(
        name_length: RangeInclusive<usize>,
        age: RangeInclusive<u8>,
    ) -> Result<Self, PolicyError> {
        let (name_min, name_max) = (*name_length.start(), *name_length.end());
        if name_min == 0 || name_max <= name_min {
            return Err(PolicyError::NameLength {
                min: name_min,
                max: name_max,
            });
        }
        let (age_min, age_max) = (*age.start(), *age.end());
        if age_min == 0 || age_max <= age_min {
            return Err(PolicyError::AgeRange {
                min: age_min,
                max: age_max,
            });
        }
        Ok(Self {
            name_length,
            age,
            blocked_domains: normalise_domains(DEFAULT_BLOCKED_DOMAINS.iter().copied()),
        })
    }

    /// Replace the block-list. Entries are trimmed, lower-cased and
    /// de-duplicated; blank entries are dropped.
    #[must_use]
    pub fn with_blocked_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blocked_domains = normalise_domains(domains);
        self
    }

    /// Accepted name length in characters.
    #[must_use]
    pub fn name_length(&self) -> &RangeInclusive<usize> {
        &self.name_length
    }

    /// Accepted age in years.
    #[must_use]
    pub fn age(&self) -> &RangeInclusive<u8> {
        &self.age
    }

    /// Case-insensitive block-list lookup.
    #[must_use]
    pub fn is_blocked_domain(&self, domain: &str) -> bool {
        self.blocked_domains
            .contains(domain.trim().to_lowercase().as_str())
    }

    /// Blocked domains in sorted order.
    pub fn blocked_domains(&self) -> impl Iterator<Item = &str> {
        self.blocked_domains.iter().map(String::as_str)
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            name_length: NAME_LENGTH_MIN..=NAME_LENGTH_MAX,
            age: AGE_MIN..=AGE_MAX,
            blocked_domains: normalise_domains(DEFAULT_BLOCKED_DOMAINS.iter().copied()),
        }
    }
}

fn normalise_domains<I, S>(domains: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    domains
        .into_iter()
        .map(|domain| domain.as_ref().trim().to_lowercase())
        .filter(|domain| !domain.is_empty())
        .collect()
}
