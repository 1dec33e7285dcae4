//! Account resolution
//!
//! Every command runs against one account. The account comes from the cached context, then
//! from an explicitly requested account, and finally from the memberships of the configured
//! API token.

use crate::api::{fetch_result, ApiRequest, Fetcher, MEMBERSHIPS_PATH};
use crate::cache::ContextRecord;
use crate::error::{AuthError, PagesError};
use crate::invocation::InvocationContext;
use crate::selector::{select_one, Selector};
use serde::Deserialize;
use tracing::{debug, info};

/// An account the API token is a member of.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Membership {
    pub account: AccountRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Membership {
    fn label(&self) -> String {
        if self.account.name.is_empty() {
            self.account.id.clone()
        } else {
            format!("{} ({})", self.account.name, self.account.id)
        }
    }
}

/// Resolves the account id a command runs against.
pub struct AuthResolver<'a> {
    fetcher: &'a dyn Fetcher,
    selector: &'a dyn Selector,
}

impl<'a> AuthResolver<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, selector: &'a dyn Selector) -> Self {
        Self { fetcher, selector }
    }

    /// Resolve the account for `cached`, failing with an `AuthError` when none can be found.
    pub async fn resolve(
        &self,
        cached: &ContextRecord,
        invocation: &InvocationContext,
    ) -> Result<String, AuthError> {
        if !self.fetcher.is_authenticated() {
            return Err(AuthError::MissingToken);
        }

        if let Some(account_id) = non_blank(cached.account_id.as_deref()) {
            debug!(account_id, "Using cached account");
            return Ok(account_id.to_string());
        }

        if let Some(account_id) = non_blank(invocation.account_id.as_deref()) {
            debug!(account_id, "Using explicit account");
            return Ok(account_id.to_string());
        }

        let memberships: Vec<Membership> =
            fetch_result(self.fetcher, ApiRequest::get(MEMBERSHIPS_PATH))
                .await
                .map_err(AuthError::Lookup)?;

        match memberships.as_slice() {
            [] => Err(AuthError::NoMemberships),
            [only] => {
                info!(account_id = %only.account.id, "Using the only available account");
                Ok(only.account.id.clone())
            }
            several => {
                if !invocation.is_interactive {
                    return Err(AuthError::AmbiguousAccount(
                        several.iter().map(|m| m.account.id.clone()).collect(),
                    ));
                }
                let chosen = select_one(
                    self.selector,
                    "Select an account:",
                    several,
                    Membership::label,
                    true,
                )
                .map_err(|e| match e {
                    PagesError::Prompt(message) => AuthError::Prompt(message),
                    other => AuthError::Prompt(other.to_string()),
                })?;
                chosen
                    .map(|m| m.account.id.clone())
                    .ok_or(AuthError::NoSelection)
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
