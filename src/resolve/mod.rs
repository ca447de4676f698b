//! Virtual asset path resolution over a character-model descriptor.

pub mod context;
pub mod material;
pub mod skeleton;

pub use context::{CustomizeIndex, ModelDescriptor, ModelKind, NativeResolver, ResolveContext};
pub use skeleton::SkeletonData;
