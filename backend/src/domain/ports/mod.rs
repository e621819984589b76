//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`UserRegistrationCommand`], [`UsersQuery`]) are what inbound
//! adapters call; the driven port ([`UserRegistry`]) is what outbound adapters
//! implement.

mod macros;
pub(crate) use macros::define_port_error;

mod user_registration_command;
mod user_registry;
mod users_query;

#[cfg(test)]
pub use user_registration_command::MockUserRegistrationCommand;
pub use user_registration_command::UserRegistrationCommand;
#[cfg(test)]
pub use user_registry::MockUserRegistry;
pub use user_registry::{UserRegistry, UserRegistryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
