//! Individual registration rules.
//!
//! Each rule is a pure function that either accepts the value or names the
//! single reason it fails. The tables below fix the order in which
//! [`super::validate_registration`] applies them.

use std::sync::OnceLock;

use regex::Regex;

use super::{RegistrationRejection, ValidationPolicy};

/// Rule over a textual field.
pub(super) type TextRule = fn(&str, &ValidationPolicy) -> Result<(), RegistrationRejection>;
/// Rule over the submitted age.
pub(super) type AgeRule = fn(i64, &ValidationPolicy) -> Result<(), RegistrationRejection>;

pub(super) const NAME_RULES: [TextRule; 4] =
    [name_characters, name_not_empty, name_parts, name_length];
pub(super) const EMAIL_RULES: [TextRule; 2] = [email_syntax, email_domain_allowed];
pub(super) const AGE_RULES: [AgeRule; 2] = [age_not_below_minimum, age_not_above_maximum];

const EMAIL_MAX: usize = 254;
const EMAIL_LOCAL_MAX: usize = 64;
const EMAIL_DOMAIN_MAX: usize = 253;

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_LOCAL_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_DOMAIN_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|error| panic!("regex {pattern} failed to compile: {error}"))
    })
}

fn name_regex() -> &'static Regex {
    // Empty input passes here; emptiness has its own rule.
    compiled(&NAME_RE, r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]*$")
}

fn email_local_regex() -> &'static Regex {
    compiled(
        &EMAIL_LOCAL_RE,
        r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*$",
    )
}

fn email_domain_regex() -> &'static Regex {
    compiled(
        &EMAIL_DOMAIN_RE,
        r"^(?:[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?\.)+\p{L}{2,63}$",
    )
}

pub(super) fn name_characters(
    name: &str,
    _policy: &ValidationPolicy,
) -> Result<(), RegistrationRejection> {
    if name_regex().is_match(name) {
        Ok(())
    } else {
        Err(RegistrationRejection::InvalidNameChars)
    }
}

pub(super) fn name_not_empty(
    name: &str,
    _policy: &ValidationPolicy,
) -> Result<(), RegistrationRejection> {
    if name.is_empty() {
        Err(RegistrationRejection::EmptyName)
    } else {
        Ok(())
    }
}

pub(super) fn name_parts(
    name: &str,
    _policy: &ValidationPolicy,
) -> Result<(), RegistrationRejection> {
    let found = name.split_whitespace().count();
    if found < 2 {
        Err(RegistrationRejection::InsufficientNameParts { found })
    } else {
        Ok(())
    }
}

pub(super) fn name_length(
    name: &str,
    policy: &ValidationPolicy,
) -> Result<(), RegistrationRejection> {
    let length = name.chars().count();
    let bounds = policy.name_length();
    if bounds.contains(&length) {
        Ok(())
    } else {
        Err(RegistrationRejection::NameLengthOutOfRange {
            min: *bounds.start(),
            max: *bounds.end(),
            length,
        })
    }
}

pub(super) fn email_syntax(
    email: &str,
    _policy: &ValidationPolicy,
) -> Result<(), RegistrationRejection> {
    if is_well_formed_email(email) {
        Ok(())
    } else {
        Err(RegistrationRejection::InvalidEmailFormat)
    }
}

// Internationalised addresses are accepted: atoms and labels may hold any
// Unicode letter or digit, and lengths are counted in characters.
fn is_well_formed_email(email: &str) -> bool {
    if email.chars().count() > EMAIL_MAX {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    (1..=EMAIL_LOCAL_MAX).contains(&local.chars().count())
        && domain.chars().count() <= EMAIL_DOMAIN_MAX
        && email_local_regex().is_match(local)
        && email_domain_regex().is_match(domain)
}

pub(super) fn email_domain_allowed(
    email: &str,
    policy: &ValidationPolicy,
) -> Result<(), RegistrationRejection> {
    let domain = email
        .rsplit_once('@')
        .map_or("", |(_, domain)| domain)
        .to_lowercase();
    if policy.is_blocked_domain(&domain) {
        Err(RegistrationRejection::DisposableEmailDomain { domain })
    } else {
        Ok(())
    }
}

pub(super) fn age_not_below_minimum(
    age: i64,
    policy: &ValidationPolicy,
) -> Result<(), RegistrationRejection> {
    let min = *policy.age().start();
    if age < i64::from(min) {
        Err(RegistrationRejection::AgeTooLow { min, age })
    } else {
        Ok(())
    }
}

pub(super) fn age_not_above_maximum(
    age: i64,
    policy: &ValidationPolicy,
) -> Result<(), RegistrationRejection> {
    let max = *policy.age().end();
    if age > i64::from(max) {
        Err(RegistrationRejection::AgeTooHigh { max, age })
    } else {
        Ok(())
    }
}
