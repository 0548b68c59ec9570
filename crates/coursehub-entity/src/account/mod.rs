//! Account and profile entities.

pub mod model;
pub mod profile;

pub use model::{Account, CreateAccount};
pub use profile::{CreateProfile, Profile, UpdateProfile};
