//! # coursehub-service
//!
//! Business logic for CourseHub. Every service checks the caller's
//! permission for its `(service, operation)` pair before touching a
//! repository.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod academic_year;
pub mod account;
pub mod context;
pub mod course;
pub mod node;
pub mod role;
pub mod session;

pub use academic_year::AcademicYearService;
pub use account::{AccountService, ProfileService};
pub use context::RequestContext;
pub use course::{AffectationService, CourseService, CourseTypeService};
pub use node::{NodeMap, NodeService, UeService};
pub use role::RoleService;
pub use session::SessionService;
