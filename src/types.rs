//! Type definitions for the ZeroGate SDK.
//!
//! Resource models and request bodies used by the resource services.

use serde::{Deserialize, Serialize};

/// Fields shared by every stored resource.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Base {
    /// Unique identifier (e.g. `"ten_..."`).
    pub id: String,
    /// Creation time, Unix seconds.
    #[serde(default)]
    pub created: i64,
    /// Last update time, Unix seconds.
    #[serde(default)]
    pub updated: i64,
    /// Deletion time, if soft-deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

/// Audit fields on resources that track who changed them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AuditBase {
    /// Actor that created the resource.
    #[serde(default)]
    pub created_by: String,
    /// Actor that last modified the resource.
    #[serde(default)]
    pub modified_by: String,
}

/// A tenant.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Tenant {
    /// Identifier and timestamps.
    #[serde(flatten)]
    pub base: Base,
    /// Who created and last modified the tenant.
    #[serde(flatten)]
    pub audit: AuditBase,
    /// Tenant name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Owning organization ID.
    #[serde(default)]
    pub organization: String,
}

/// Request to create a tenant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TenantCreateRequest {
    /// Tenant name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Request to update a tenant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TenantUpdateRequest {
    /// Tenant ID.
    pub id: String,
    /// New name.
    pub name: String,
    /// New description.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_serialization() {
        let req = TenantCreateRequest {
            name: "Test".to_string(),
            description: "test tenant".to_string(),
        };

        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"name":"Test","description":"test tenant"}"#);
    }

    #[test]
    fn test_tenant_deserialization() {
        let json = r#"{
            "id": "ten_ea87af463d9fc38203690805c1c1fa33",
            "created": 1700000000,
            "updated": 1700000100,
            "deleted_at": null,
            "created_by": "usr_1",
            "modified_by": "usr_2",
            "name": "Test",
            "description": "test tenant",
            "organization": "org_7af4b215d3a00a5dc1f5abf3c3f9686c"
        }"#;

        let tenant: Tenant = serde_json::from_str(json).unwrap();
        assert_eq!(tenant.base.id, "ten_ea87af463d9fc38203690805c1c1fa33");
        assert_eq!(tenant.base.updated, 1700000100);
        assert!(tenant.base.deleted_at.is_none());
        assert_eq!(tenant.audit.modified_by, "usr_2");
        assert_eq!(tenant.name, "Test");
        assert_eq!(tenant.organization, "org_7af4b215d3a00a5dc1f5abf3c3f9686c");
    }

    #[test]
    fn test_tenant_minimal_deserialization() {
        let tenant: Tenant = serde_json::from_str(r#"{"id":"ten_1","name":"n"}"#).unwrap();
        assert_eq!(tenant.base.id, "ten_1");
        assert_eq!(tenant.base.created, 0);
        assert!(tenant.audit.created_by.is_empty());
    }
}
