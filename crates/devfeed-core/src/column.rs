//! Column header icons for feed subscriptions.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;
use tracing::warn;

use crate::icon::Icon;

/// Owner kind a feed subscription is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestType {
    Users,
    Orgs,
    Other(String),
}

/// Which event listing of the owner a subscription reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestSubtype {
    /// Activity performed by the owner.
    Events,
    /// The owner's dashboard.
    ReceivedEvents,
    Other(String),
}

impl From<String> for RequestType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "users" => Self::Users,
            "orgs" => Self::Orgs,
            _ => Self::Other(value),
        }
    }
}

impl From<RequestType> for String {
    fn from(value: RequestType) -> Self {
        match value {
            RequestType::Users => "users".to_string(),
            RequestType::Orgs => "orgs".to_string(),
            RequestType::Other(other) => other,
        }
    }
}

impl FromStr for RequestType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl From<String> for RequestSubtype {
    fn from(value: String) -> Self {
        match value.as_str() {
            "events" => Self::Events,
            "received_events" => Self::ReceivedEvents,
            _ => Self::Other(value),
        }
    }
}

impl From<RequestSubtype> for String {
    fn from(value: RequestSubtype) -> Self {
        match value {
            RequestSubtype::Events => "events".to_string(),
            RequestSubtype::ReceivedEvents => "received_events".to_string(),
            RequestSubtype::Other(other) => other,
        }
    }
}

impl FromStr for RequestSubtype {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// Icon and subtitle of a column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub icon: Icon,
    /// Empty when the subtype has no label.
    pub subtitle: String,
}

/// Header for a subscription column.
#[must_use]
pub fn column_header(request_type: &RequestType, subtype: &RequestSubtype) -> ColumnHeader {
    let subtitle = match subtype {
        RequestSubtype::Events => "Activity",
        RequestSubtype::ReceivedEvents => "Dashboard",
        RequestSubtype::Other(_) => "",
    }
    .to_string();

    let icon = match request_type {
        RequestType::Users if *subtype == RequestSubtype::ReceivedEvents => Icon::Home,
        RequestType::Users => Icon::Person,
        RequestType::Orgs => Icon::Organization,
        RequestType::Other(other) => {
            warn!(request_type = %other, "No icon configured for request type");
            return ColumnHeader {
                icon: Icon::MarkGithub,
                subtitle: String::new(),
            };
        }
    };

    ColumnHeader { icon, subtitle }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_dashboard() {
        let header = column_header(&RequestType::Users, &RequestSubtype::ReceivedEvents);
        assert_eq!(header.icon, Icon::Home);
        assert_eq!(header.subtitle, "Dashboard");
    }

    #[test]
    fn test_user_and_org_activity() {
        let user = column_header(&RequestType::Users, &RequestSubtype::Events);
        assert_eq!(user.icon, Icon::Person);
        assert_eq!(user.subtitle, "Activity");

        let org = column_header(&"orgs".parse().unwrap(), &"events".parse().unwrap());
        assert_eq!(org.icon, Icon::Organization);
    }

    #[test]
    fn test_unknown_request_type() {
        let header = column_header(
            &RequestType::Other("teams".to_string()),
            &RequestSubtype::Other("members".to_string()),
        );
        assert_eq!(header.icon, Icon::MarkGithub);
        assert_eq!(header.subtitle, "");
    }

    #[test]
    fn test_request_type_serde() {
        let parsed: RequestType = serde_json::from_str(r#""orgs""#).unwrap();
        assert_eq!(parsed, RequestType::Orgs);
        assert_eq!(
            serde_json::to_string(&RequestSubtype::ReceivedEvents).unwrap(),
            r#""received_events""#
        );
    }
}
