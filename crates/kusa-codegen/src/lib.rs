pub mod directive;
pub mod error;
pub mod generator;
pub mod modifiers;
pub mod traits;

// Target emitters
pub mod emitters;

// Re-exports
pub use directive::line_directive;
pub use error::CodegenError;
pub use generator::{CodeGenerator, GeneratedUnit};
pub use modifiers::{accessor_keyword, translate_modifier, NOT_IMPLEMENTED};
pub use traits::{Target, TargetEmitter};
