pub mod csharp;

use crate::error::CodegenError;
use crate::traits::{Target, TargetEmitter};

/// Create the appropriate emitter for the given target.
pub fn create_emitter(target: Target) -> Result<Box<dyn TargetEmitter>, CodegenError> {
    match target {
        Target::CSharp => Ok(Box::new(csharp::CSharpEmitter)),
    }
}
