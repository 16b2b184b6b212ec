pub mod assets;
pub mod envelope;
pub mod error;
pub mod model;
pub mod moves;
pub mod options;
pub mod view_model;

pub use assets::*;
pub use envelope::*;
pub use error::*;
pub use model::*;
pub use moves::*;
pub use options::*;
pub use view_model::*;
