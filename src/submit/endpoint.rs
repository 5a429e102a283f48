use std::collections::BTreeMap;
use std::fmt;

use crate::form::form_model::FormIdentity;

/// Basic-auth username/password pair bound to an endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Remote target for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointBinding {
    pub url: String,
    pub auth: Option<BasicAuth>,
}

impl EndpointBinding {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            auth: None,
        }
    }

    pub fn with_auth(mut self, username: &str, password: &str) -> Self {
        self.auth = Some(BasicAuth::new(username, password));
        self
    }
}

/// Identity to binding table. Built once at startup and only read after.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointTable {
    bindings: BTreeMap<FormIdentity, EndpointBinding>,
}

impl EndpointTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, identity: FormIdentity, binding: EndpointBinding) -> Self {
        self.bindings.insert(identity, binding);
        self
    }

    pub fn resolve(&self, identity: &FormIdentity) -> Option<&EndpointBinding> {
        self.bindings.get(identity)
    }

    pub fn identities(&self) -> impl Iterator<Item = &FormIdentity> {
        self.bindings.keys()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(FormIdentity, EndpointBinding)> for EndpointTable {
    fn from_iter<I: IntoIterator<Item = (FormIdentity, EndpointBinding)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}
