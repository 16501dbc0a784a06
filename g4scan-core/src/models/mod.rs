pub mod record;
pub mod strand;

// re-export for cleaner imports
pub use self::record::{BlockLayout, G4Record, ITEM_RGB};
pub use self::strand::Strand;
