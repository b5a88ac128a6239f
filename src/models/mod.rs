pub mod album;
pub mod collection;
pub mod stage;
pub mod validation;

pub use album::{Album, AlbumStats, Audit, BestFeature, BestProduction, Track};
pub use collection::{Collection, CollectionMeta, SCHEMA_VERSION};
pub use stage::{Stage, Status, Transition};
pub use validation::{ValidationWarning, WarningKind};
