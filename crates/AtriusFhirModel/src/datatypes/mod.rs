//! Complex datatypes used by the bundled resources.

pub mod attachment;
pub mod codeable_concept;
pub mod coding;
pub mod extension;
pub mod identifier;
pub mod meta;
pub mod narrative;
pub mod period;
pub mod quantity;
pub mod reference;

pub use attachment::*;
pub use codeable_concept::*;
pub use coding::*;
pub use extension::*;
pub use identifier::*;
pub use meta::*;
pub use narrative::*;
pub use period::*;
pub use quantity::*;
pub use reference::*;
