pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod monge;
pub mod naming;
pub mod reconstruct;
pub mod registry;
pub mod session;

pub use config::SceneConfig;
pub use error::{ClassificationError, MongeError, ValidationError};
pub use naming::{GreekLetter, Label, View};
pub use session::{Drawn, Session, Snapshot};

pub fn version() -> &'static str {
    "0.1.0"
}
