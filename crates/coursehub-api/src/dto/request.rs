//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use coursehub_auth::SessionTokens;
use coursehub_entity::account::profile::{CreateProfile, UpdateProfile};
use coursehub_entity::course::affectation::CreateAffectation;
use coursehub_entity::course::model::CreateCourse;
use coursehub_entity::node::ue::CreateUe;
use coursehub_service::account::service::{CreateAccountRequest, UpdateAccountRequest};
use coursehub_service::academic_year::service::CreateAcademicYearRequest;
use coursehub_service::course::service::UpdateCourseRequest;
use coursehub_service::node::service::{CreateNodeRequest, UpdateNodeRequest};
use coursehub_service::node::ue::UpdateUeRequest;
use coursehub_service::role::service::RoleRequest;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login.
    #[validate(length(min = 1, message = "Login is required"))]
    pub login: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Both tokens, as sent to `/auth/refresh` and `/auth/logout`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TokenPairRequest {
    /// Access token.
    #[serde(default)]
    pub access_token: String,
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

impl From<TokenPairRequest> for SessionTokens {
    fn from(req: TokenPairRequest) -> Self {
        SessionTokens {
            access_token: req.access_token,
            refresh_token: req.refresh_token,
        }
    }
}

/// Create account request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccountBody {
    /// Login.
    #[validate(length(min = 1, max = 100))]
    pub login: String,
    /// Plain-text password, checked against the password policy.
    #[validate(length(min = 1))]
    pub password: String,
}

impl From<CreateAccountBody> for CreateAccountRequest {
    fn from(body: CreateAccountBody) -> Self {
        Self {
            login: body.login,
            password: body.password,
        }
    }
}

/// Update account request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAccountBody {
    /// New login.
    #[validate(length(min = 1, max = 100))]
    pub login: Option<String>,
    /// New password.
    #[validate(length(min = 1))]
    pub password: Option<String>,
}

impl From<UpdateAccountBody> for UpdateAccountRequest {
    fn from(body: UpdateAccountBody) -> Self {
        Self {
            login: body.login,
            password: body.password,
        }
    }
}

/// Role assignment for one academic year.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetRoleBody {
    /// Academic year.
    #[validate(range(min = 1900, max = 9999))]
    pub academic_year: i32,
    /// Role to hold during that year.
    pub role_id: Uuid,
}

/// Create profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfileBody {
    #[validate(length(min = 1, max = 100))]
    pub firstname: String,
    #[validate(length(min = 1, max = 100))]
    pub lastname: String,
    #[validate(email)]
    pub mail: String,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub quota: i32,
    #[validate(range(min = 1900, max = 9999))]
    pub academic_year: i32,
    pub account_id: Option<Uuid>,
}

impl From<CreateProfileBody> for CreateProfile {
    fn from(body: CreateProfileBody) -> Self {
        Self {
            firstname: body.firstname,
            lastname: body.lastname,
            mail: body.mail,
            quota: body.quota,
            academic_year: body.academic_year,
            account_id: body.account_id,
        }
    }
}

/// Update profile request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileBody {
    #[validate(length(min = 1, max = 100))]
    pub firstname: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub lastname: Option<String>,
    #[validate(email)]
    pub mail: Option<String>,
    #[validate(range(min = 0))]
    pub quota: Option<i32>,
}

impl From<UpdateProfileBody> for UpdateProfile {
    fn from(body: UpdateProfileBody) -> Self {
        Self {
            firstname: body.firstname,
            lastname: body.lastname,
            mail: body.mail,
            quota: body.quota,
        }
    }
}

/// Link or unlink a profile's account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LinkAccountBody {
    /// `null` unlinks.
    pub account_id: Option<Uuid>,
}

/// Create or update a role.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RoleBody {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<RoleBody> for RoleRequest {
    fn from(body: RoleBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
        }
    }
}

/// Replace a role's permission set.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetPermissionsBody {
    pub permission_ids: Vec<Uuid>,
}

/// Open an academic year.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAcademicYearBody {
    #[validate(range(min = 1900, max = 9999))]
    pub year: i32,
    pub description: Option<String>,
    #[serde(default)]
    pub is_current: bool,
}

impl From<CreateAcademicYearBody> for CreateAcademicYearRequest {
    fn from(body: CreateAcademicYearBody) -> Self {
        Self {
            year: body.year,
            description: body.description,
            is_current: body.is_current,
        }
    }
}

/// Create node request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNodeBody {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub parent_id: Uuid,
}

impl From<CreateNodeBody> for CreateNodeRequest {
    fn from(body: CreateNodeBody) -> Self {
        Self {
            name: body.name,
            parent_id: body.parent_id,
        }
    }
}

/// Rename and/or move a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateNodeBody {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub parent_id: Option<Uuid>,
}

impl From<UpdateNodeBody> for UpdateNodeRequest {
    fn from(body: UpdateNodeBody) -> Self {
        Self {
            name: body.name,
            parent_id: body.parent_id,
        }
    }
}

/// Create UE request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUeBody {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub apogee_code: Option<String>,
    pub parent_id: Uuid,
}

impl From<CreateUeBody> for CreateUe {
    fn from(body: CreateUeBody) -> Self {
        Self {
            name: body.name,
            apogee_code: body.apogee_code,
            parent_id: body.parent_id,
        }
    }
}

/// Update UE request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUeBody {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub apogee_code: Option<String>,
    pub parent_id: Option<Uuid>,
}

impl From<UpdateUeBody> for UpdateUeRequest {
    fn from(body: UpdateUeBody) -> Self {
        Self {
            name: body.name,
            apogee_code: body.apogee_code,
            parent_id: body.parent_id,
        }
    }
}

/// Create or update a course type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CourseTypeBody {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Create course request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCourseBody {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0))]
    pub hours: i32,
    pub course_type_id: Uuid,
    #[validate(range(min = 1900, max = 9999))]
    pub academic_year: i32,
}

impl From<CreateCourseBody> for CreateCourse {
    fn from(body: CreateCourseBody) -> Self {
        Self {
            name: body.name,
            hours: body.hours,
            course_type_id: body.course_type_id,
            academic_year: body.academic_year,
        }
    }
}

/// Update course request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCourseBody {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub hours: Option<i32>,
    pub course_type_id: Option<Uuid>,
}

impl From<UpdateCourseBody> for UpdateCourseRequest {
    fn from(body: UpdateCourseBody) -> Self {
        Self {
            name: body.name,
            hours: body.hours,
            course_type_id: body.course_type_id,
        }
    }
}

/// Create affectation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAffectationBody {
    pub profile_id: Uuid,
    pub course_id: Uuid,
    #[validate(range(min = 0))]
    pub hours: i32,
}

impl From<CreateAffectationBody> for CreateAffectation {
    fn from(body: CreateAffectationBody) -> Self {
        Self {
            profile_id: body.profile_id,
            course_id: body.course_id,
            hours: body.hours,
        }
    }
}

/// Change the hours of an affectation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateHoursBody {
    #[validate(range(min = 0))]
    pub hours: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_fields() {
        let req = LoginRequest {
            login: String::new(),
            password: "x".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_profile_mail_must_be_valid() {
        let body = CreateProfileBody {
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            mail: "not-a-mail".into(),
            quota: 192,
            academic_year: 2024,
            account_id: None,
        };
        assert!(body.validate().is_err());

        let body = CreateProfileBody {
            mail: "ada@univ.example".into(),
            ..body
        };
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_negative_hours_rejected() {
        assert!(UpdateHoursBody { hours: -1 }.validate().is_err());
        assert!(UpdateHoursBody { hours: 0 }.validate().is_ok());
    }

    #[test]
    fn test_token_pair_access_optional() {
        let req: TokenPairRequest =
            serde_json::from_str(r#"{"refresh_token":"r"}"#).expect("valid body");
        assert!(req.validate().is_ok());
        let tokens = SessionTokens::from(req);
        assert!(tokens.access_token.is_empty());
    }
}
