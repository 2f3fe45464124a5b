//! Project records and invitation input.

use crate::libs::board::ValidationError;
use crate::libs::task::{null_as_empty, string_or_number, Member};
use serde::{Deserialize, Serialize};

/// Role given to invited members unless another one is requested.
pub const DEFAULT_INVITE_ROLE: &str = "member";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub members: Vec<Member>,
}

/// Body of project creation and update requests.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectDraft {
    /// Draft for a new project; the name is required.
    pub fn new(name: &str, description: Option<&str>) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        Ok(Self {
            name: Some(name.to_owned()),
            description: description.map(str::to_owned),
        })
    }

    /// Partial update; blank names are rejected, absent ones left unchanged.
    pub fn patch(name: Option<&str>, description: Option<&str>) -> Result<Self, ValidationError> {
        let name = match name.map(str::trim) {
            Some("") => return Err(ValidationError::EmptyProjectName),
            name => name.map(str::to_owned),
        };
        Ok(Self {
            name,
            description: description.map(str::to_owned),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InviteRequest {
    pub emails: Vec<String>,
    pub role: String,
}

impl InviteRequest {
    /// Builds an invitation from a comma-separated list of addresses.
    pub fn parse(emails: &str, role: &str) -> Result<Self, ValidationError> {
        let emails = parse_invite_emails(emails)?;
        Ok(Self {
            emails,
            role: role.trim().to_owned(),
        })
    }
}

/// Splits `input` on commas, trims each address and drops the blank ones.
pub fn parse_invite_emails(input: &str) -> Result<Vec<String>, ValidationError> {
    let emails: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_owned)
        .collect();

    if emails.is_empty() {
        return Err(ValidationError::NoInviteEmails);
    }
    Ok(emails)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_emails_are_trimmed_and_blanks_dropped() {
        let emails = parse_invite_emails(" ada@example.com,, grace@example.com ,").unwrap();
        assert_eq!(emails, vec!["ada@example.com", "grace@example.com"]);
    }

    #[test]
    fn invite_without_addresses_is_rejected() {
        assert_eq!(parse_invite_emails(" , "), Err(ValidationError::NoInviteEmails));
    }

    #[test]
    fn project_patch_skips_absent_fields() {
        let patch = ProjectDraft::patch(None, Some("new scope")).unwrap();
        assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({ "description": "new scope" }));
        assert_eq!(ProjectDraft::patch(Some("  "), None), Err(ValidationError::EmptyProjectName));
    }

    #[test]
    fn project_with_null_members_decodes() {
        let project: Project =
            serde_json::from_value(serde_json::json!({ "id": 12, "name": "Apollo", "members": null })).unwrap();
        assert_eq!(project.id, "12");
        assert!(project.members.is_empty());
    }
}
