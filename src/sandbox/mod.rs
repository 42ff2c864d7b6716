pub mod types;
pub mod mount;
pub mod sandbox;

pub use types::{MountOptions, SandboxOptions};
pub use mount::import;
pub use sandbox::Sandbox;
