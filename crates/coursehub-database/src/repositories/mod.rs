//! Repository implementations for all CourseHub entities.

pub mod academic_year;
pub mod account;
pub mod account_metadata;
pub mod affectation;
pub mod course;
pub mod course_type;
pub mod node;
pub mod permission;
pub mod profile;
pub mod role;
pub mod ue;

pub use academic_year::AcademicYearRepository;
pub use account::AccountRepository;
pub use account_metadata::AccountMetadataRepository;
pub use affectation::AffectationRepository;
pub use course::CourseRepository;
pub use course_type::CourseTypeRepository;
pub use node::NodeRepository;
pub use permission::PermissionRepository;
pub use profile::ProfileRepository;
pub use role::RoleRepository;
pub use ue::UeRepository;
