/**
* filename : mod
* author : HAMA
* date: 2025. 6. 4.
* description:
**/

pub mod pattern_types;
pub mod scanner;

pub use pattern_types::*;
pub use scanner::*;
