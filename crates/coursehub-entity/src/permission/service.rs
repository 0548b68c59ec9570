//! Service identifiers used as the first half of a permission.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A guarded service area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "service_name")]
pub enum ServiceName {
    /// Accounts and their per-year roles.
    AccountService,
    /// Personal profiles.
    ProfileService,
    /// Roles and their permission sets.
    RoleService,
    /// The permission catalogue.
    PermissionService,
    /// Academic years.
    AcademicYearService,
    /// Folder nodes of the teaching hierarchy.
    NodeService,
    /// UE leaves.
    UeService,
    /// Courses.
    CourseService,
    /// Course types.
    CourseTypeService,
    /// Profile-to-course assignments.
    AffectationService,
}

impl ServiceName {
    /// Every service, in declaration order.
    pub const ALL: [ServiceName; 10] = [
        Self::AccountService,
        Self::ProfileService,
        Self::RoleService,
        Self::PermissionService,
        Self::AcademicYearService,
        Self::NodeService,
        Self::UeService,
        Self::CourseService,
        Self::CourseTypeService,
        Self::AffectationService,
    ];

    /// Return the service identifier as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountService => "AccountService",
            Self::ProfileService => "ProfileService",
            Self::RoleService => "RoleService",
            Self::PermissionService => "PermissionService",
            Self::AcademicYearService => "AcademicYearService",
            Self::NodeService => "NodeService",
            Self::UeService => "UeService",
            Self::CourseService => "CourseService",
            Self::CourseTypeService => "CourseTypeService",
            Self::AffectationService => "AffectationService",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = coursehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|svc| svc.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                coursehub_core::AppError::validation(format!("Invalid service name: '{s}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            "affectationservice".parse::<ServiceName>().unwrap(),
            ServiceName::AffectationService
        );
        assert!("Nope".parse::<ServiceName>().is_err());
    }

    #[test]
    fn test_serde_uses_variant_name() {
        let json = serde_json::to_string(&ServiceName::NodeService).unwrap();
        assert_eq!(json, "\"NodeService\"");
    }
}
