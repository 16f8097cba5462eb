use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use super::storage;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedLocation {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub selected_location: Option<SelectedLocation>,
}

impl Session {
    pub fn location_id(&self) -> Option<&str> {
        self.selected_location
            .as_ref()
            .map(|l| l.id.as_str())
            .filter(|id| !id.trim().is_empty())
    }

    pub fn location_name(&self) -> &str {
        self.selected_location
            .as_ref()
            .map(|l| l.name.as_str())
            .unwrap_or("")
    }
}

/// Credentials every remote call is made with.
///
/// Built from the session only when both a location and a token are present;
/// callers skip the request otherwise instead of sending a malformed one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    pub location_id: String,
    pub token: String,
}

impl RequestContext {
    pub fn from_session(session: &Session) -> Option<Self> {
        let location_id = session.location_id()?.to_string();
        let token = session
            .access_token
            .clone()
            .filter(|t| !t.trim().is_empty())?;
        Some(Self { location_id, token })
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Session context provider component
#[component]
pub fn SessionProvider(children: ChildrenFn) -> impl IntoView {
    let session = RwSignal::new(Session {
        access_token: storage::get_access_token(),
        selected_location: storage::get_selected_location(),
    });

    if session.with_untracked(|s| s.location_id().is_none()) {
        log::warn!("no location selected; purchase orders will not load");
    }

    provide_context(session);

    children()
}

/// Hook to access the session
pub fn use_session() -> RwSignal<Session> {
    use_context::<RwSignal<Session>>().expect("SessionProvider not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(location: Option<&str>, token: Option<&str>) -> Session {
        Session {
            access_token: token.map(str::to_string),
            selected_location: location.map(|id| SelectedLocation {
                id: id.to_string(),
                name: "Main Street".to_string(),
            }),
        }
    }

    #[test]
    fn context_requires_location_and_token() {
        assert_eq!(
            RequestContext::from_session(&session(Some("loc-1"), Some("abc"))),
            Some(RequestContext {
                location_id: "loc-1".into(),
                token: "abc".into()
            })
        );
        assert_eq!(RequestContext::from_session(&session(None, Some("abc"))), None);
        assert_eq!(RequestContext::from_session(&session(Some(" "), Some("abc"))), None);
        assert_eq!(RequestContext::from_session(&session(Some("loc-1"), None)), None);
    }

    #[test]
    fn bearer_header() {
        let ctx = RequestContext {
            location_id: "loc-1".into(),
            token: "abc".into(),
        };
        assert_eq!(ctx.bearer(), "Bearer abc");
    }
}
